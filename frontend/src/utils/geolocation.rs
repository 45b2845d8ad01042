//! Browser geolocation wrapped in a future. Denial, timeout and missing
//! support all degrade to an error string so callers can fall back to the
//! configured default location.

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(target_arch = "wasm32")]
pub async fn current_position() -> Result<Coordinates, String> {
    use wasm_bindgen::{JsCast, JsValue};

    let geolocation = web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .navigator()
        .geolocation()
        .map_err(|_| "Geolocation is not supported by this browser.".to_string())?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_success = wasm_bindgen::closure::Closure::once_into_js(
            move |position: web_sys::Position| {
                let coords = position.coords();
                let pair = js_sys::Array::of2(
                    &JsValue::from_f64(coords.latitude()),
                    &JsValue::from_f64(coords.longitude()),
                );
                let _ = resolve.call1(&JsValue::NULL, &pair);
            },
        );
        let reject_on_failure = reject.clone();
        let on_error =
            wasm_bindgen::closure::Closure::once_into_js(move |err: web_sys::PositionError| {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_f64(err.code() as f64));
            });

        let options = web_sys::PositionOptions::new();
        options.set_enable_high_accuracy(false);
        options.set_timeout(8_000);
        options.set_maximum_age(10 * 60 * 1000);

        if geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &options,
            )
            .is_err()
        {
            let _ =
                reject_on_failure.call1(&JsValue::NULL, &JsValue::from_str("Location unavailable."));
        }
    });

    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(value) => {
            let pair = js_sys::Array::from(&value);
            let latitude = pair.get(0).as_f64().ok_or("Location unavailable.")?;
            let longitude = pair.get(1).as_f64().ok_or("Location unavailable.")?;
            Ok(Coordinates {
                latitude,
                longitude,
            })
        }
        Err(err) => Err(describe_position_error(err.as_f64())),
    }
}

#[cfg(target_arch = "wasm32")]
fn describe_position_error(code: Option<f64>) -> String {
    match code.map(|c| c as u16) {
        Some(1) => "Location permission denied.".to_string(),
        Some(2) => "Location unavailable.".to_string(),
        Some(3) => "Location request timed out.".to_string(),
        _ => "Location unavailable.".to_string(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn current_position() -> Result<Coordinates, String> {
    Err("Geolocation is only available in the browser.".to_string())
}

/// Resolve the viewer's position, falling back to the configured default
/// when the browser denies or cannot provide one.
pub async fn position_or_default() -> Coordinates {
    match current_position().await {
        Ok(coordinates) => coordinates,
        Err(reason) => {
            log::warn!("geolocation unavailable ({reason}); using default location");
            config::default_coordinates()
        }
    }
}
