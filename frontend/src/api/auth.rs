use crate::{api::client::ApiClient, api::types::*, config};

impl ApiClient {
    /// Exchange credentials for a bearer token. The sign-in endpoint is the
    /// only unauthenticated call; the backend answers with the raw JWT.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String, ApiError> {
        let url = match self.base_url_override() {
            Some(base) => format!("{base}/auth/sign-in"),
            None => config::await_sign_in_url().await,
        };
        let response = self
            .send_with_retry(|| Ok(self.http_client().post(&url).json(request)))
            .await?;

        let status = response.status();
        if status.is_success() {
            let token = response
                .text()
                .await
                .map_err(|e| ApiError::malformed(format!("Failed to read token: {e}")))?;
            // Some backends quote the token as a JSON string literal.
            let token = token.trim().trim_matches('"').to_string();
            if token.is_empty() {
                return Err(ApiError::malformed("Sign-in returned an empty token"));
            }
            Ok(token)
        } else {
            let body: Option<ApiErrorBody> = response.json().await.ok();
            Err(ApiError::from_status(status.as_u16(), body))
        }
    }

    /// Best-effort server-side sign-out; local state is cleared regardless
    /// of the outcome.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{base_url}/auth/sign-out"))
                    .headers(headers))
            })
            .await?;
        Self::read_ack(response).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::types::ApiErrorKind;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn sign_in_returns_trimmed_token() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/sign-in")
                .json_body(serde_json::json!({ "username": "asta", "password": "secret" }));
            then.status(200).body("\"header.payload.signature\"");
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let token = api
            .sign_in(&SignInRequest {
                username: "asta".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(token, "header.payload.signature");
    }

    #[tokio::test]
    async fn sign_in_rejection_is_surfaced() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/sign-in");
            then.status(401)
                .json_body(serde_json::json!({ "error": "Invalid username or password" }));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let err = api
            .sign_in(&SignInRequest {
                username: "asta".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid username or password");
    }
}
