use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// The backend speaks camelCase; every wire type renames accordingly.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub experience_level: Option<i32>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Create/update payload. `username` and `password` are only sent when the
/// admin sets them; the password is write-only and never appears in reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub experience_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bicycle {
    pub bicycle_id: i64,
    pub bicycle_number: i64,
    pub in_operate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BicyclePayload {
    pub bicycle_number: i64,
    pub in_operate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub id: i64,
    pub route_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePayload {
    pub route_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub shift_id: i64,
    pub date_of_shift: NaiveDate,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub bicycle_id: Option<i64>,
    pub route_id: i64,
    #[serde(default)]
    pub substituted_id: Option<i64>,
    // "HH:MM:SS" wall-clock stamps, unset until clock-in/out.
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub total_hours: Option<f64>,
}

impl Shift {
    pub fn is_in_progress(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_none()
    }

    pub fn is_startable(&self) -> bool {
        self.start_time.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPayload {
    pub date_of_shift: NaiveDate,
    pub employee_id: i64,
    pub bicycle_id: i64,
    pub route_id: i64,
    /// Defaults to the assigned employee when the form leaves it blank.
    pub substituted_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHoursRow {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub year: i32,
    pub month: u32,
    pub total_monthly_hours: f64,
    pub has_substituted: bool,
}

/// Error body the backend returns alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    Unauthorized,
    Validation,
    Duplicate,
    Server,
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub kind: ApiErrorKind,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.message
    }
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Network,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Unauthorized,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Validation,
        }
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Server,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            kind: ApiErrorKind::Malformed,
        }
    }

    /// Map a non-success status plus the optional backend error body to a
    /// tagged error. The body's `code` wins over status guessing; a bare
    /// 500 stays `Server` rather than being read as a duplicate.
    pub fn from_status(status: u16, body: Option<ApiErrorBody>) -> Self {
        let message = body
            .as_ref()
            .map(|b| b.error.clone())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        let kind = kind_for(status, body.as_ref().and_then(|b| b.code.as_deref()));
        Self { message, kind }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind == ApiErrorKind::Duplicate
    }
}

fn kind_for(status: u16, code: Option<&str>) -> ApiErrorKind {
    if let Some(code) = code {
        let code = code.to_ascii_uppercase();
        if code.contains("DUPLICATE") || code.contains("CONFLICT") {
            return ApiErrorKind::Duplicate;
        }
        if code.contains("VALIDATION") {
            return ApiErrorKind::Validation;
        }
        if code.contains("UNAUTHORIZED") || code.contains("FORBIDDEN") {
            return ApiErrorKind::Unauthorized;
        }
    }
    match status {
        401 | 403 => ApiErrorKind::Unauthorized,
        409 => ApiErrorKind::Duplicate,
        400 | 422 => ApiErrorKind::Validation,
        _ => ApiErrorKind::Server,
    }
}

use leptos::*;

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.message.into_view()
    }
}
