mod components;
mod panel;

pub use panel::AdminDashboardPage;
