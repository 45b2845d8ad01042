use crate::api::{client::ApiClient, types::*};

impl ApiClient {
    pub async fn fetch_employee(&self, id: i64) -> Result<Employee, ApiError> {
        self.fetch_item("/Employees", id).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: &EmployeePayload,
    ) -> Result<(), ApiError> {
        self.update_item("/Employees", id, payload).await
    }

    /// Routes the employee is assigned to ride.
    pub async fn fetch_employee_routes(
        &self,
        employee_id: i64,
    ) -> Result<Vec<RouteInfo>, ApiError> {
        self.fetch_list(&format!(
            "/Employee/get-employee-routes-by-id/{employee_id}"
        ))
        .await
    }
}
