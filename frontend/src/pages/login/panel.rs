use leptos::*;
use leptos_meta::Title;

use super::view_model::use_login_view_model;
use crate::components::{forms::TextField, layout::ErrorMessage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let vm = use_login_view_model();
    let form = vm.form;
    let error = vm.error;
    let action = vm.sign_in_action;
    let pending = action.pending();

    let submit_disabled = move || !form.is_valid() || pending.get();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submit_disabled() {
            return;
        }
        error.set(None);
        action.dispatch(form.to_request());
    };

    view! {
        <Title text="Go-card - Sign in"/>
        <div class="min-h-screen bg-surface flex flex-col items-center justify-center px-4">
            <h1 class="text-2xl font-semibold text-fg mb-4">
                "Go-card management system"
            </h1>
            <div class="w-full max-w-md bg-surface-elevated border border-border rounded-lg shadow-lg p-8">
                <h2 class="text-xl font-semibold text-fg text-center mb-6">"Sign in"</h2>
                {move || error.get().map(|err| view! { <ErrorMessage message=err.message /> })}
                <form on:submit=on_submit class="space-y-4">
                    <TextField label="Username" value=form.username placeholder="Enter username" />
                    <TextField
                        label="Password"
                        value=form.password
                        input_type="password"
                        placeholder="Enter password"
                    />
                    <button
                        type="submit"
                        class="w-full inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=submit_disabled
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_sign_in_form_with_disabled_submit() {
        let html = render_to_string(move || view! { <LoginPage /> });
        assert!(html.contains("Go-card management system"));
        assert!(html.contains("Username"));
        assert!(html.contains("Password"));
        // Empty form: submit starts disabled.
        assert!(html.contains("disabled"));
    }
}
