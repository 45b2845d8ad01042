pub mod bicycles_section;
pub mod employees_section;
pub mod routes_section;
pub mod shifts_section;
