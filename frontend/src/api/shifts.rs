use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::api::{client::ApiClient, types::*};

impl ApiClient {
    /// Shifts assigned to the signed-in employee.
    pub async fn fetch_my_shifts(&self) -> Result<Vec<Shift>, ApiError> {
        self.fetch_list("/Employee/get-employee-shifts").await
    }

    /// Record a clock-in stamp (`HH:MM:SS`) on a startable shift.
    pub async fn start_shift(&self, shift_id: i64, start_time: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let encoded = utf8_percent_encode(start_time, NON_ALPHANUMERIC).to_string();
        let url = format!("{base_url}/Shift/{shift_id}/start?startTime={encoded}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers))
            })
            .await?;
        Self::read_ack(response).await
    }

    /// Record a clock-out stamp on an in-progress shift; the backend derives
    /// the shift's total hours from the pair.
    pub async fn end_shift(&self, shift_id: i64, end_time: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let encoded = utf8_percent_encode(end_time, NON_ALPHANUMERIC).to_string();
        let url = format!("{base_url}/Shift/{shift_id}/end?endTime={encoded}");
        let response = self
            .send_with_retry(|| {
                let headers = self.get_auth_headers()?;
                Ok(self.http_client().put(&url).headers(headers))
            })
            .await?;
        Self::read_ack(response).await
    }
}
