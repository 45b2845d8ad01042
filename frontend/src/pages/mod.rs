pub mod admin_management;
pub mod dashboard_admin;
pub mod dashboard_employee;
pub mod login;
