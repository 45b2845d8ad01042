use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::utils::geolocation::Coordinates;

/// Runtime configuration resolved once at startup. Sources, in order:
/// `window.__GOCARD_ENV` (env.js), `window.__GOCARD_CONFIG`, a fetched
/// `./config.json`, then built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub sign_in_url: Option<String>,
    pub default_latitude: Option<f64>,
    pub default_longitude: Option<f64>,
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

// Fallback location when geolocation is denied: Copenhagen.
const DEFAULT_LATITUDE: f64 = 55.6761;
const DEFAULT_LONGITUDE: f64 = 12.5683;

#[cfg(target_arch = "wasm32")]
fn global_object(name: &str) -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    Some(js_sys::Object::from(any))
}

#[cfg(target_arch = "wasm32")]
fn string_key(obj: &js_sys::Object, key: &str) -> Option<String> {
    js_sys::Reflect::get(obj, &key.into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.as_string())
}

#[cfg(target_arch = "wasm32")]
fn float_key(obj: &js_sys::Object, key: &str) -> Option<f64> {
    js_sys::Reflect::get(obj, &key.into())
        .ok()
        .and_then(|v| v.as_f64())
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    let obj = global_object("__GOCARD_ENV").or_else(|| global_object("__GOCARD_CONFIG"))?;
    Some(RuntimeConfig {
        api_base_url: string_key(&obj, "api_base_url").or_else(|| string_key(&obj, "API_BASE_URL")),
        sign_in_url: string_key(&obj, "sign_in_url").or_else(|| string_key(&obj, "SIGN_IN_URL")),
        default_latitude: float_key(&obj, "default_latitude"),
        default_longitude: float_key(&obj, "default_longitude"),
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(target_arch = "wasm32")]
async fn resolve() -> RuntimeConfig {
    if let Some(cfg) = snapshot_from_globals() {
        return cfg;
    }
    fetch_runtime_config().await.unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
async fn resolve() -> RuntimeConfig {
    RuntimeConfig::default()
}

async fn await_config() -> RuntimeConfig {
    if let Some(cached) = CONFIG.get() {
        return cached.clone();
    }
    let resolved = resolve().await;
    let _ = CONFIG.set(resolved.clone());
    resolved
}

pub async fn await_api_base_url() -> String {
    await_config()
        .await
        .api_base_url
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Sign-in endpoint; defaults to a path under the API base when not
/// configured separately.
pub async fn await_sign_in_url() -> String {
    let cfg = await_config().await;
    match cfg.sign_in_url {
        Some(url) => url,
        None => format!(
            "{}/auth/sign-in",
            cfg.api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
        ),
    }
}

pub fn default_coordinates() -> Coordinates {
    let cfg = CONFIG.get().cloned().unwrap_or_default();
    Coordinates {
        latitude: cfg.default_latitude.unwrap_or(DEFAULT_LATITUDE),
        longitude: cfg.default_longitude.unwrap_or(DEFAULT_LONGITUDE),
    }
}

pub async fn init() {
    let _ = await_config().await;
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn host_defaults_apply() {
        assert_eq!(await_api_base_url().await, DEFAULT_API_BASE_URL);
        assert_eq!(
            await_sign_in_url().await,
            format!("{DEFAULT_API_BASE_URL}/auth/sign-in")
        );
        let coords = default_coordinates();
        assert!((coords.latitude - DEFAULT_LATITUDE).abs() < f64::EPSILON);
        assert!((coords.longitude - DEFAULT_LONGITUDE).abs() < f64::EPSILON);
    }
}
