use chrono::{DateTime, Local, NaiveDate, Utc};

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

pub fn today() -> NaiveDate {
    now_local().date_naive()
}

/// Wall-clock stamp in the `HH:MM:SS` form the shift endpoints expect.
pub fn now_time_stamp() -> String {
    now_local().format("%H:%M:%S").to_string()
}

pub fn now_instant() -> DateTime<Utc> {
    Utc::now()
}

/// Milliseconds since the Unix epoch, usable from both the browser and
/// host-side tests.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Format an elapsed duration as `HH:MM:SS` for the live clock display.
/// Display-only: negative inputs render as zero, rejection of negative
/// durations happens where hours are computed.
pub fn format_elapsed(ms: i64) -> String {
    let total_seconds = (ms.max(0)) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_pads_components() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(1_000), "00:00:01");
        assert_eq!(format_elapsed(61_000), "00:01:01");
        assert_eq!(format_elapsed(3_601_000), "01:00:01");
        assert_eq!(format_elapsed(36_061_000), "10:01:01");
    }

    #[test]
    fn format_elapsed_clamps_negative_to_zero() {
        assert_eq!(format_elapsed(-5_000), "00:00:00");
    }

    #[test]
    fn time_stamp_has_expected_shape() {
        let stamp = now_time_stamp();
        assert_eq!(stamp.len(), 8);
        let parts: Vec<&str> = stamp.split(':').collect();
        assert_eq!(parts.len(), 3);
        for part in parts {
            assert!(part.parse::<u32>().is_ok());
        }
    }
}
