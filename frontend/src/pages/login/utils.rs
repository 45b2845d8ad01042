use leptos::*;

use crate::api::SignInRequest;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    /// Both fields filled; gates the submit button so empty credentials
    /// never reach the network.
    pub fn is_valid(&self) -> bool {
        form_is_valid(&self.username.get(), &self.password.get())
    }

    pub fn to_request(&self) -> SignInRequest {
        SignInRequest {
            username: self.username.get_untracked().trim().to_string(),
            password: self.password.get_untracked(),
        }
    }
}

pub fn form_is_valid(username: &str, password: &str) -> bool {
    !username.trim().is_empty() && !password.is_empty()
}
