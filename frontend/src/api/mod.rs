mod auth;
pub mod client;
mod employees;
mod reports;
mod shifts;
pub mod types;
pub mod weather;

pub use client::*;
pub use types::*;
