use leptos::*;

use crate::state::session::{self, use_session, Role};

#[component]
pub fn Header() -> impl IntoView {
    let (session, _) = use_session();
    let is_admin = move || session.get().role == Role::Admin;
    let is_employee = move || session.get().role == Role::Employee;
    let username = move || session.get().username.unwrap_or_default();

    let sign_out_action = session::use_sign_out_action();
    let sign_out_pending = sign_out_action.pending();
    {
        create_effect(move |_| {
            if sign_out_action.value().get().is_some() {
                if let Some(win) = web_sys::window() {
                    let _ = win.location().set_href("/");
                }
            }
        });
    }
    let on_sign_out = move |_| {
        if sign_out_pending.get_untracked() {
            return;
        }
        sign_out_action.dispatch(());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">
                            "Go-card"
                        </h1>
                    </div>
                    <div class="flex items-center gap-4">
                        <nav class="flex space-x-4">
                            <Show when=is_admin>
                                <a href="/dashboard-admin" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                    "Dashboard"
                                </a>
                                <a href="/admin/management" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                    "Management"
                                </a>
                            </Show>
                            <Show when=is_employee>
                                <a href="/dashboard-employee" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                    "Dashboard"
                                </a>
                            </Show>
                            <button
                                on:click=on_sign_out
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                                disabled={move || sign_out_pending.get()}
                            >
                                "Sign out"
                            </button>
                        </nav>
                        <span class="hidden sm:block text-sm text-fg-muted">{username}</span>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_session_with_role;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_admin_links_for_admin() {
        let html = render_to_string(move || {
            provide_session_with_role(Role::Admin);
            view! { <Header /> }
        });
        assert!(html.contains("Management"));
        assert!(html.contains("/dashboard-admin"));
    }

    #[test]
    fn header_hides_admin_links_for_employee() {
        let html = render_to_string(move || {
            provide_session_with_role(Role::Employee);
            view! { <Header /> }
        });
        assert!(!html.contains("/admin/management"));
        assert!(html.contains("/dashboard-employee"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_session_with_role(Role::Employee);
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn feedback_components_render_their_messages() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="broken".into() />
                    <SuccessMessage message="saved".into() />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("broken"));
        assert!(html.contains("saved"));
    }
}
