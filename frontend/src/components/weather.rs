use leptos::*;

use crate::{
    api::weather::{describe_weather_code, WeatherClient, WeatherResponse},
    api::ApiError,
    components::layout::{ErrorMessage, LoadingSpinner},
    utils::geolocation,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub windspeed: f64,
    pub description: &'static str,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub precipitation_probability: Option<i32>,
}

/// Collapse a forecast response into the one-line summary the dashboards
/// show. Absent `current_weather` means the provider had nothing for the
/// location.
pub fn pick_today_snapshot(response: &WeatherResponse) -> Option<WeatherSnapshot> {
    let current = response.current_weather.as_ref()?;
    Some(WeatherSnapshot {
        temperature: current.temperature,
        windspeed: current.windspeed,
        description: describe_weather_code(current.weathercode),
        min_temperature: response.daily.temperature_2m_min.first().copied(),
        max_temperature: response.daily.temperature_2m_max.first().copied(),
        precipitation_probability: response
            .daily
            .precipitation_probability_max
            .as_ref()
            .and_then(|probabilities| probabilities.first().copied()),
    })
}

async fn load_snapshot() -> Result<Option<WeatherSnapshot>, ApiError> {
    let position = geolocation::position_or_default().await;
    let response = WeatherClient::new()
        .forecast(position.latitude, position.longitude, 1)
        .await?;
    Ok(pick_today_snapshot(&response))
}

#[component]
pub fn WeatherSection() -> impl IntoView {
    // The resource is owned by this component's reactive scope, so an
    // unmount mid-flight cannot write into a dead view.
    let snapshot = create_local_resource(|| (), |_| async move { load_snapshot().await });

    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <h2 class="text-lg font-semibold text-fg mb-3">"Weather"</h2>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || snapshot.get().map(|result| match result {
                    Ok(Some(snapshot)) => view! {
                        <div class="space-y-1">
                            <p class="text-3xl font-bold text-fg">
                                {format!("{:.1}°C", snapshot.temperature)}
                            </p>
                            <p class="text-sm text-fg-muted">{snapshot.description}</p>
                            <p class="text-sm text-fg-muted">
                                {format!("Wind {:.0} km/h", snapshot.windspeed)}
                            </p>
                            {snapshot.min_temperature.zip(snapshot.max_temperature).map(|(min, max)| view! {
                                <p class="text-sm text-fg-muted">
                                    {format!("Today {min:.0}°C to {max:.0}°C")}
                                </p>
                            })}
                            {snapshot.precipitation_probability.map(|p| view! {
                                <p class="text-sm text-fg-muted">{format!("Rain chance {p}%")}</p>
                            })}
                        </div>
                    }.into_view(),
                    Ok(None) => view! {
                        <p class="text-sm text-fg-muted">"No forecast available for this location."</p>
                    }.into_view(),
                    Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
                })}
            </Suspense>
        </section>
    }
}
