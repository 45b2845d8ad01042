//! Open-Meteo forecast client. Read-only, unauthenticated, and entirely
//! separate from the Go-card backend.

use serde::{Deserialize, Serialize};

use crate::api::types::ApiError;

pub const FORECAST_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

// Field names follow the provider's wire format.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    pub is_day: i32,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    pub time: Vec<String>,
    #[serde(default)]
    pub precipitation_probability: Option<Vec<i32>>,
    #[serde(default)]
    pub cloudcover: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
    #[serde(default)]
    pub hourly: Option<HourlyWeather>,
    pub daily: DailyWeather,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::new_with_base_url(FORECAST_BASE_URL)
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<WeatherResponse, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "precipitation_probability,cloudcover".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_probability_max"
                        .to_string(),
                ),
                ("forecast_days", days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Failed to fetch weather: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::server(format!(
                "Weather provider answered {}",
                response.status()
            )));
        }
        response
            .json::<WeatherResponse>()
            .await
            .map_err(|e| ApiError::malformed(format!("Failed to parse weather: {e}")))
    }
}

/// WMO weather interpretation codes, condensed for display.
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 | 2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 | 56 | 57 => "Drizzle",
        61 | 63 | 65 | 66 | 67 => "Rain",
        71 | 73 | 75 | 77 => "Snow",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown conditions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_code_descriptions() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(2), "Partly cloudy");
        assert_eq!(describe_weather_code(63), "Rain");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(42), "Unknown conditions");
    }

    #[test]
    fn response_parses_without_optional_sections() {
        let response: WeatherResponse = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2026-08-05"],
                "temperature_2m_max": [21.3],
                "temperature_2m_min": [14.8]
            }
        }))
        .unwrap();
        assert!(response.current_weather.is_none());
        assert!(response.hourly.is_none());
        assert_eq!(response.daily.time.len(), 1);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn forecast_builds_the_expected_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "55.6761")
                .query_param("longitude", "12.5683")
                .query_param("current_weather", "true")
                .query_param("forecast_days", "1")
                .query_param("timezone", "auto");
            then.status(200).json_body(serde_json::json!({
                "current_weather": {
                    "temperature": 18.4,
                    "windspeed": 11.0,
                    "weathercode": 2,
                    "is_day": 1,
                    "time": "2026-08-05T12:00"
                },
                "daily": {
                    "time": ["2026-08-05"],
                    "temperature_2m_max": [21.3],
                    "temperature_2m_min": [14.8],
                    "precipitation_probability_max": [35]
                }
            }));
        });

        let client = WeatherClient::new_with_base_url(server.url("/v1/forecast"));
        let response = client.forecast(55.6761, 12.5683, 1).await.unwrap();
        mock.assert();
        let current = response.current_weather.unwrap();
        assert_eq!(current.weathercode, 2);
        assert_eq!(describe_weather_code(current.weathercode), "Partly cloudy");
    }
}
