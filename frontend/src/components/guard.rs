use leptos::*;

use crate::state::session::{use_session, Role};

/// Whether a resolved role may enter a view with the given allow-list. An
/// empty allow-list admits every known role; an unknown role never passes.
pub fn role_allowed(role: Role, allow: &[Role]) -> bool {
    if !role.is_known() {
        return false;
    }
    allow.is_empty() || allow.contains(&role)
}

fn redirect_to_sign_in() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/" {
                    return;
                }
            }
            // Replace history so back-navigation cannot re-enter the page.
            let _ = location.replace("/");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::warn!("unauthorized; sign-in redirect skipped outside the browser");
}

#[component]
pub fn RequireRole(
    #[prop(optional)] roles: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let (session, _) = use_session();
    let allow = store_value(roles);
    let allowed =
        create_memo(move |_| allow.with_value(|allow| role_allowed(session.get().role, allow)));

    create_effect(move |_| {
        if !allowed.get() {
            redirect_to_sign_in();
        }
    });

    view! {
        <Show when=move || allowed.get() fallback=|| ()>
            {children()}
        </Show>
    }
}
