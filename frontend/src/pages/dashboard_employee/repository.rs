use chrono::{Datelike, NaiveDate};

use crate::api::{ApiClient, ApiError, Employee, MonthlyHoursRow, RouteInfo};

pub async fn fetch_profile(api: &ApiClient, user_id: i64) -> Result<Employee, ApiError> {
    api.fetch_employee(user_id).await
}

pub async fn fetch_routes(api: &ApiClient, employee_id: i64) -> Result<Vec<RouteInfo>, ApiError> {
    api.fetch_employee_routes(employee_id).await
}

/// The (year, month) pairs for the current month and the `n - 1` before it,
/// newest first.
pub fn recent_months(today: NaiveDate, n: u32) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let mut year = today.year();
    let mut month = today.month();
    for _ in 0..n {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months
}

/// Monthly totals for the last three months, oldest first. A month that
/// fails to load is skipped rather than failing the whole chart.
pub async fn fetch_work_hours(
    api: &ApiClient,
    employee_id: i64,
    today: NaiveDate,
) -> Result<Vec<MonthlyHoursRow>, ApiError> {
    let mut rows = Vec::new();
    for (year, month) in recent_months(today, 3) {
        match api.fetch_monthly_hours(employee_id, year, month).await {
            Ok(mut result) => {
                if !result.is_empty() {
                    rows.push(result.remove(0));
                }
            }
            Err(err) => {
                log::warn!("failed to load hours for {month}/{year}: {err}");
            }
        }
    }
    rows.reverse();
    Ok(rows)
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::client::TOKEN_KEY;
    use crate::utils::storage;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn work_hours_skip_failing_months_and_return_oldest_first() {
        storage::set_item(TOKEN_KEY, "test-token").unwrap();
        let server = MockServer::start_async().await;
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

        server.mock(|when, then| {
            when.method(GET)
                .path("/api/reports/monthly-hours")
                .query_param("month", "8");
            then.status(200).json_body(serde_json::json!([{
                "employeeId": 4, "firstName": "Asta", "lastName": "Berg",
                "year": 2026, "month": 8, "totalMonthlyHours": 64.0, "hasSubstituted": false
            }]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/reports/monthly-hours")
                .query_param("month", "7");
            then.status(500)
                .json_body(serde_json::json!({ "error": "report engine down" }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/reports/monthly-hours")
                .query_param("month", "6");
            then.status(200).json_body(serde_json::json!([{
                "employeeId": 4, "firstName": "Asta", "lastName": "Berg",
                "year": 2026, "month": 6, "totalMonthlyHours": 118.25, "hasSubstituted": true
            }]));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let rows = fetch_work_hours(&api, 4, today).await.unwrap();
        let months: Vec<u32> = rows.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![6, 8]);
    }
}
