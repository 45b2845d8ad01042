//! Token-based session resolution. The stored JWT is decoded without
//! signature verification (the backend issued it); anything that fails to
//! decode resolves to `Role::Unknown` rather than erroring. The resolved
//! session travels through a Leptos context so no component reads the token
//! itself, and storage is written only at sign-in and sign-out.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use leptos::*;
use serde_json::Value;

use crate::{
    api::{client, ApiClient, ApiError, SignInRequest},
    pages::login::repository as login_repository,
    utils::storage,
};

pub use crate::api::client::TOKEN_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    Employee,
    #[default]
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Role {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "employee" => Role::Employee,
            _ => Role::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != Role::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub role: Role,
}

type SessionContext = (ReadSignal<Session>, WriteSignal<Session>);

fn decode_claims(token: &str) -> Option<Value> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&decoded).ok()
}

fn claim_as_i64(claims: &Value, key: &str) -> Option<i64> {
    match claims.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn session_from_token(token: &str) -> Session {
    let Some(claims) = decode_claims(token) else {
        return Session::default();
    };
    let role = claims
        .get("role")
        .and_then(|v| v.as_str())
        .map(Role::parse)
        .unwrap_or_default();
    Session {
        user_id: claim_as_i64(&claims, "nameid"),
        username: claims
            .get("unique_name")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        role,
    }
}

/// Resolve the caller's session from the stored credential. Pure read, no
/// side effects; every failure path yields an unknown role.
pub fn resolve_session() -> Session {
    match storage::get_item(TOKEN_KEY) {
        Some(token) => session_from_token(&token),
        None => Session::default(),
    }
}

/// Persist a freshly issued token and push the decoded session into the
/// context. The only storage write besides sign-out.
pub fn apply_token(token: &str, set_session: WriteSignal<Session>) -> Result<Session, ApiError> {
    storage::set_item(TOKEN_KEY, token)
        .map_err(|_| ApiError::validation("Failed to persist the session token"))?;
    let session = session_from_token(token);
    set_session.set(session.clone());
    Ok(session)
}

pub fn clear_session(set_session: WriteSignal<Session>) {
    client::clear_stored_session();
    set_session.set(Session::default());
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (session, set_session) = create_signal(resolve_session());
    provide_context::<SessionContext>((session, set_session));
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(Session::default()))
}

pub async fn sign_in_request(
    request: SignInRequest,
    repo: &login_repository::LoginRepository,
    set_session: WriteSignal<Session>,
) -> Result<Session, ApiError> {
    let token = repo.sign_in(&request).await?;
    apply_token(&token, set_session)
}

pub fn use_sign_in_action() -> Action<SignInRequest, Result<Session, ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repo = login_repository::LoginRepository::new_with_client(std::rc::Rc::new(api));

    create_action(move |request: &SignInRequest| {
        let request = request.clone();
        let repo = repo.clone();
        async move { sign_in_request(request, &repo, set_session).await }
    })
}

pub async fn sign_out(api: &ApiClient, set_session: WriteSignal<Session>) -> Result<(), ApiError> {
    let result = api.sign_out().await;
    // Local teardown happens even when the server call fails.
    clear_session(set_session);
    if let Err(err) = &result {
        log::warn!("server sign-out failed: {err}");
    }
    result
}

pub fn use_sign_out_action() -> Action<(), Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_default();
    create_action(move |_: &()| {
        let api = api.clone();
        async move { sign_out(&api, set_session).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::tests::token_with_payload;
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn sign_in_persists_token_and_resolves_session() {
        let server = MockServer::start_async().await;
        let token = token_with_payload(serde_json::json!({
            "nameid": "4",
            "unique_name": "asta",
            "role": "admin"
        }));
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/sign-in");
            then.status(200).body(token.clone());
        });

        let runtime = create_runtime();
        let (session, set_session) = create_signal(Session::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));
        let repo = login_repository::LoginRepository::new_with_client(std::rc::Rc::new(api));

        let resolved = sign_in_request(
            SignInRequest {
                username: "asta".into(),
                password: "secret".into(),
            },
            &repo,
            set_session,
        )
        .await
        .unwrap();

        assert_eq!(resolved.role, Role::Admin);
        assert_eq!(session.get_untracked().role, Role::Admin);
        assert_eq!(resolve_session().role, Role::Admin);

        clear_session(set_session);
        assert_eq!(session.get_untracked().role, Role::Unknown);
        assert_eq!(resolve_session().role, Role::Unknown);
        runtime.dispose();
    }
}
