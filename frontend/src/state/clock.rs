//! Clock-in/out state machine over the employee's shifts for the day.
//!
//! Mode is derived, never stored: an in-progress shift (start set, end
//! unset) wins over a startable one (no start), and within a class the
//! first shift in server-returned order is used. Nothing advances locally
//! until the server acknowledges a stamp; after every successful stamp the
//! shift list is refetched.

use chrono::{DateTime, NaiveDate, Utc};
use leptos::*;

use crate::{
    api::{ApiClient, ApiError, Shift},
    utils::{storage, time},
};

pub const CLOCK_IN_STARTED_AT_KEY: &str = "clock_in_started_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEventKind {
    ClockIn,
    ClockOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// A shift today can be started.
    In,
    /// A shift today is in progress; the only action is clocking out.
    Out,
    /// Nothing to start and nothing in progress.
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct ShiftsState {
    pub shifts: Vec<Shift>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

pub fn use_shifts() -> (ReadSignal<ShiftsState>, WriteSignal<ShiftsState>) {
    create_signal(ShiftsState::default())
}

pub fn shifts_for_day(shifts: &[Shift], day: NaiveDate) -> Vec<&Shift> {
    shifts.iter().filter(|s| s.date_of_shift == day).collect()
}

pub fn in_progress_shift(shifts: &[Shift], day: NaiveDate) -> Option<&Shift> {
    shifts_for_day(shifts, day)
        .into_iter()
        .find(|s| s.is_in_progress())
}

pub fn startable_shift(shifts: &[Shift], day: NaiveDate) -> Option<&Shift> {
    shifts_for_day(shifts, day)
        .into_iter()
        .find(|s| s.is_startable())
}

pub fn clock_mode(shifts: &[Shift], day: NaiveDate) -> ClockMode {
    if in_progress_shift(shifts, day).is_some() {
        ClockMode::Out
    } else if startable_shift(shifts, day).is_some() {
        ClockMode::In
    } else {
        ClockMode::Unavailable
    }
}

fn parse_time_to_minutes(value: &str) -> Option<f64> {
    let mut parts = value.split(':');
    let hours: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = parts.next()?.parse().ok()?;
    let seconds: f64 = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0.0,
    };
    Some(hours * 60.0 + minutes + seconds / 60.0)
}

/// Hours between two `HH:MM:SS` stamps, rounded to two decimals. A negative
/// span is rejected outright rather than clamped.
pub fn total_hours(start: &str, end: &str) -> Result<f64, ApiError> {
    let start_minutes = parse_time_to_minutes(start)
        .ok_or_else(|| ApiError::validation(format!("Invalid start time: {start}")))?;
    let end_minutes = parse_time_to_minutes(end)
        .ok_or_else(|| ApiError::validation(format!("Invalid end time: {end}")))?;
    let diff = end_minutes - start_minutes;
    if diff < 0.0 {
        return Err(ApiError::validation(
            "Shift end time is before its start time",
        ));
    }
    Ok((diff / 60.0 * 100.0).round() / 100.0)
}

pub async fn load_shifts(
    api: &ApiClient,
    set_shifts: WriteSignal<ShiftsState>,
) -> Result<(), ApiError> {
    set_shifts.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match api.fetch_my_shifts().await {
        Ok(shifts) => {
            set_shifts.update(|state| {
                state.shifts = shifts;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_shifts.update(|state| {
                state.error = Some(error.clone());
                state.loading = false;
            });
            Err(error)
        }
    }
}

/// Start today's startable shift at the current wall-clock time. Fails
/// without touching the network when no shift is startable.
pub async fn clock_in(
    api: &ApiClient,
    shifts: ReadSignal<ShiftsState>,
    set_shifts: WriteSignal<ShiftsState>,
) -> Result<(), ApiError> {
    let today = time::today();
    let shift_id = shifts
        .with_untracked(|state| startable_shift(&state.shifts, today).map(|s| s.shift_id))
        .ok_or_else(|| ApiError::validation("No shift available to clock in today."))?;

    let stamp = time::now_time_stamp();
    api.start_shift(shift_id, &stamp).await?;
    log::info!("clocked in shift {shift_id} at {stamp}");

    if let Err(err) = storage::set_item(CLOCK_IN_STARTED_AT_KEY, &time::now_instant().to_rfc3339())
    {
        log::warn!("failed to persist clock-in instant: {err}");
    }
    load_shifts(api, set_shifts).await
}

/// End today's in-progress shift. Fails without touching the network when
/// nothing is in progress.
pub async fn clock_out(
    api: &ApiClient,
    shifts: ReadSignal<ShiftsState>,
    set_shifts: WriteSignal<ShiftsState>,
) -> Result<(), ApiError> {
    let today = time::today();
    let shift_id = shifts
        .with_untracked(|state| in_progress_shift(&state.shifts, today).map(|s| s.shift_id))
        .ok_or_else(|| ApiError::validation("No active shift to clock out from."))?;

    let stamp = time::now_time_stamp();
    api.end_shift(shift_id, &stamp).await?;
    log::info!("clocked out shift {shift_id} at {stamp}");

    storage::remove_item(CLOCK_IN_STARTED_AT_KEY);
    load_shifts(api, set_shifts).await
}

pub fn persisted_start_instant() -> Option<DateTime<Utc>> {
    let raw = storage::get_item(CLOCK_IN_STARTED_AT_KEY)?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The instant the running timer counts from. Missing storage (cleared
/// mid-shift, different browser) falls back to now so the display still
/// runs.
pub fn ensure_start_instant() -> DateTime<Utc> {
    if let Some(instant) = persisted_start_instant() {
        return instant;
    }
    let now = time::now_instant();
    if let Err(err) = storage::set_item(CLOCK_IN_STARTED_AT_KEY, &now.to_rfc3339()) {
        log::warn!("failed to persist clock-in instant: {err}");
    }
    now
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::client::TOKEN_KEY;
    use httpmock::prelude::*;

    fn today_shift_json(id: i64, start: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "shiftId": id,
            "dateOfShift": time::today().format("%Y-%m-%d").to_string(),
            "routeId": 2,
            "substitutedId": 4,
            "startTime": start,
        })
    }

    #[tokio::test]
    async fn clock_in_stamps_then_refetches() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        storage::remove_item(CLOCK_IN_STARTED_AT_KEY);
        let server = MockServer::start_async().await;
        let start = server.mock(|when, then| {
            when.method(PUT).path("/api/Shift/7/start");
            then.status(204);
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/Employee/get-employee-shifts");
            then.status(200)
                .json_body(serde_json::json!([today_shift_json(7, Some("09:00:00"))]));
        });

        let runtime = create_runtime();
        let (shifts, set_shifts) = create_signal(ShiftsState {
            shifts: vec![Shift {
                shift_id: 7,
                date_of_shift: time::today(),
                employee_id: Some(4),
                bicycle_id: Some(1),
                route_id: 2,
                substituted_id: Some(4),
                start_time: None,
                end_time: None,
                total_hours: None,
            }],
            loading: false,
            error: None,
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        clock_in(&api, shifts, set_shifts).await.unwrap();

        start.assert();
        assert_eq!(list.hits(), 1);
        assert!(persisted_start_instant().is_some());
        assert_eq!(
            clock_mode(&shifts.get_untracked().shifts, time::today()),
            ClockMode::Out
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn clock_out_outside_out_mode_makes_no_network_call() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let end = server.mock(|when, then| {
            when.method(PUT).path_contains("/end");
            then.status(204);
        });

        let runtime = create_runtime();
        // No in-progress shift anywhere.
        let (shifts, set_shifts) = create_signal(ShiftsState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        let err = clock_out(&api, shifts, set_shifts).await.unwrap_err();
        assert_eq!(err.message, "No active shift to clock out from.");
        assert_eq!(end.hits(), 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_stamp_leaves_state_unchanged() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        storage::remove_item(CLOCK_IN_STARTED_AT_KEY);
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(PUT).path("/api/Shift/7/start");
            then.status(500)
                .json_body(serde_json::json!({ "error": "boom" }));
        });

        let runtime = create_runtime();
        let before = ShiftsState {
            shifts: vec![Shift {
                shift_id: 7,
                date_of_shift: time::today(),
                employee_id: Some(4),
                bicycle_id: Some(1),
                route_id: 2,
                substituted_id: Some(4),
                start_time: None,
                end_time: None,
                total_hours: None,
            }],
            loading: false,
            error: None,
        };
        let (shifts, set_shifts) = create_signal(before.clone());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        assert!(clock_in(&api, shifts, set_shifts).await.is_err());
        // Start time still unset locally, no persisted instant.
        assert!(shifts.get_untracked().shifts[0].start_time.is_none());
        assert!(persisted_start_instant().is_none());
        runtime.dispose();
    }
}
