use leptos::*;

use super::utils::LoginFormState;
use crate::{
    api::{ApiError, SignInRequest},
    state::session::{self, Role, Session},
};

/// Landing page for a freshly resolved role; unknown roles stay on the
/// sign-in page.
pub fn dashboard_path_for(role: Role) -> Option<&'static str> {
    match role {
        Role::Admin => Some("/dashboard-admin"),
        Role::Employee => Some("/dashboard-employee"),
        Role::Unknown => None,
    }
}

#[derive(Clone)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub sign_in_action: Action<SignInRequest, Result<Session, ApiError>>,
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let sign_in_action = session::use_sign_in_action();

    let form_copy = form;
    create_effect(move |_| {
        if let Some(result) = sign_in_action.value().get() {
            match result {
                Ok(session) => {
                    error.set(None);
                    form_copy.password.set(String::new());
                    match dashboard_path_for(session.role) {
                        Some(path) => {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().set_href(path);
                            }
                        }
                        None => error.set(Some(ApiError::unauthorized(
                            "Signed in, but the account has no recognised role.",
                        ))),
                    }
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        sign_in_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_paths_follow_role() {
        assert_eq!(dashboard_path_for(Role::Admin), Some("/dashboard-admin"));
        assert_eq!(
            dashboard_path_for(Role::Employee),
            Some("/dashboard-employee")
        );
        assert_eq!(dashboard_path_for(Role::Unknown), None);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get_untracked().is_none());
            assert!(vm.form.username.get_untracked().is_empty());
        });
    }
}
