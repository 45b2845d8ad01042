use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::{ApiError, ApiErrorBody},
    config,
    utils::storage,
};

pub const TOKEN_KEY: &str = "token";

/// Transient failures are retried this many times on top of the first
/// attempt, with exponential backoff.
const MAX_RETRIES: u32 = 2;
const RETRY_BASE_DELAY_MS: u64 = 250;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn base_url_override(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let token = storage::get_item(TOKEN_KEY)
            .ok_or_else(|| ApiError::unauthorized("No token found"))?;
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {token}")
                .parse()
                .map_err(|_| ApiError::unauthorized("Invalid token format"))?,
        );
        Ok(headers)
    }

    /// Send a request, retrying network errors and 502/503/504 responses
    /// with capped exponential backoff. The builder closure is re-invoked
    /// per attempt since a `RequestBuilder` is consumed by `send`.
    pub(crate) async fn send_with_retry<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> Result<RequestBuilder, ApiError>,
    {
        let mut attempt: u32 = 0;
        loop {
            match build()?.send().await {
                Ok(response) if is_transient(response.status()) && attempt < MAX_RETRIES => {
                    attempt += 1;
                    log::warn!(
                        "transient status {} from {}, retry {attempt}/{MAX_RETRIES}",
                        response.status(),
                        response.url()
                    );
                    backoff_delay(attempt).await;
                }
                Ok(response) => return Ok(response),
                Err(err) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    log::warn!("request failed ({err}), retry {attempt}/{MAX_RETRIES}");
                    backoff_delay(attempt).await;
                }
                Err(err) => return Err(ApiError::network(format!("Request failed: {err}"))),
            }
        }
    }

    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            clear_stored_session();
            redirect_to_sign_in_if_needed();
        }
    }

    /// Decode a success body, or turn a failure response into a tagged
    /// `ApiError` using the backend error body when one is present.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::malformed(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    /// Like `read_json` but for endpoints whose success body is irrelevant
    /// (mutations are followed by a refetch anyway).
    pub(crate) async fn read_ack(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
        let body: Option<ApiErrorBody> = response.json().await.ok();
        ApiError::from_status(status.as_u16(), body)
    }

    // Generic collection surface shared by every REST resource.

    pub async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}{path}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        Self::read_json(response).await
    }

    pub async fn fetch_item<T: DeserializeOwned>(
        &self,
        path: &str,
        id: i64,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}{path}/{id}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().get(&url).headers(headers))
            })
            .await?;
        Self::read_json(response).await
    }

    pub async fn create_item<P: Serialize>(&self, path: &str, payload: &P) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}{path}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().post(&url).headers(headers).json(payload))
            })
            .await?;
        Self::read_ack(response).await
    }

    pub async fn update_item<P: Serialize>(
        &self,
        path: &str,
        id: i64,
        payload: &P,
    ) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}{path}/{id}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers).json(payload))
            })
            .await?;
        Self::read_ack(response).await
    }

    pub async fn delete_item(&self, path: &str, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}{path}/{id}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().delete(&url).headers(headers))
            })
            .await?;
        Self::read_ack(response).await
    }
}

fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

async fn backoff_delay(attempt: u32) {
    let millis = RETRY_BASE_DELAY_MS * 2u64.saturating_pow(attempt.saturating_sub(1));
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(millis as u32).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
}

pub(crate) fn clear_stored_session() {
    storage::remove_item(TOKEN_KEY);
    storage::remove_item(crate::state::clock::CLOCK_IN_STARTED_AT_KEY);
}

fn redirect_to_sign_in_if_needed() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/" {
                    return;
                }
            }
            let _ = location.replace("/");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::warn!("session expired; sign-in redirect skipped outside the browser");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses_cover_gateway_failures() {
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::GATEWAY_TIMEOUT));
        assert!(!is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_transient(StatusCode::CONFLICT));
        assert!(!is_transient(StatusCode::OK));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::types::{ApiErrorKind, Bicycle};
    use httpmock::prelude::*;

    fn seed_token() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
    }

    #[tokio::test]
    async fn fetch_list_attaches_bearer_token() {
        seed_token();
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/Bicycles")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(serde_json::json!([{ "bicycleId": 1, "bicycleNumber": 12, "inOperate": true }]));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let bicycles: Vec<Bicycle> = api.fetch_list("/Bicycles").await.unwrap();
        mock.assert();
        assert_eq!(bicycles.len(), 1);
        assert_eq!(bicycles[0].bicycle_number, 12);
    }

    #[tokio::test]
    async fn transient_failures_are_retried_then_succeed() {
        seed_token();
        let server = MockServer::start_async().await;
        let failures = server.mock(|when, then| {
            when.method(GET).path("/api/Routes");
            then.status(503);
        });
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let result: Result<Vec<crate::api::types::RouteInfo>, _> =
            api.fetch_list("/Routes").await;
        // All attempts exhausted against the failing mock.
        assert_eq!(failures.hits(), 3);
        let err = result.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Server);
    }

    #[tokio::test]
    async fn duplicate_conflict_is_tagged() {
        seed_token();
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/Bicycles");
            then.status(409).json_body(serde_json::json!({
                "error": "Bicycle number already exists",
                "code": "DUPLICATE_BICYCLE_NUMBER"
            }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let payload = crate::api::types::BicyclePayload {
            bicycle_number: 12,
            in_operate: true,
        };
        let err = api.create_item("/Bicycles", &payload).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.message, "Bicycle number already exists");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        storage::remove_item(TOKEN_KEY);
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/Bicycles");
            then.status(200).json_body(serde_json::json!([]));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let result: Result<Vec<Bicycle>, _> = api.fetch_list("/Bicycles").await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);
        assert_eq!(mock.hits(), 0);
    }
}
