use crate::api::{client::ApiClient, types::*};

impl ApiClient {
    /// Monthly aggregate for one employee; the backend answers with zero or
    /// one row for the month.
    pub async fn fetch_monthly_hours(
        &self,
        employee_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlyHoursRow>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{base_url}/reports/monthly-hours");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(&url)
                    .headers(headers)
                    .query(&[
                        ("employeeId", employee_id.to_string()),
                        ("year", year.to_string()),
                        ("month", month.to_string()),
                    ]))
            })
            .await?;
        Self::read_json(response).await
    }
}
