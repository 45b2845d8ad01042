use leptos::*;
use leptos_router::*;

use crate::{
    components::guard::RequireRole,
    pages::{
        admin_management::AdminManagementPage, dashboard_admin::AdminDashboardPage,
        dashboard_employee::EmployeeDashboardPage, login::LoginPage,
    },
    state::session::{Role, SessionProvider},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/dashboard-admin",
    "/admin/management",
    "/dashboard-employee",
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/dashboard-admin", "/admin/management"];

pub const EMPLOYEE_ROUTE_PATHS: &[&str] = &["/dashboard-employee"];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    leptos_meta::provide_meta_context();
    view! {
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=LoginPage/>
                    <Route path="/dashboard-admin" view=ProtectedAdminDashboard/>
                    <Route path="/admin/management" view=ProtectedAdminManagement/>
                    <Route path="/dashboard-employee" view=ProtectedEmployeeDashboard/>
                    <Route path="/*any" view=RedirectToSignIn/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn ProtectedAdminDashboard() -> impl IntoView {
    view! { <RequireRole roles=vec![Role::Admin]><AdminDashboardPage/></RequireRole> }
}

#[component]
fn ProtectedAdminManagement() -> impl IntoView {
    view! { <RequireRole roles=vec![Role::Admin]><AdminManagementPage/></RequireRole> }
}

#[component]
fn ProtectedEmployeeDashboard() -> impl IntoView {
    view! { <RequireRole roles=vec![Role::Employee]><EmployeeDashboardPage/></RequireRole> }
}

#[component]
fn RedirectToSignIn() -> impl IntoView {
    view! {
        <Redirect
            path="/"
            options=NavigateOptions { replace: true, ..Default::default() }
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn public_entry_is_the_only_unguarded_route() {
        let guarded: HashSet<&str> = ADMIN_ROUTE_PATHS
            .iter()
            .chain(EMPLOYEE_ROUTE_PATHS)
            .copied()
            .collect();
        let unguarded: Vec<&str> = ROUTE_PATHS
            .iter()
            .copied()
            .filter(|p| !guarded.contains(p))
            .collect();
        assert_eq!(unguarded, vec!["/"]);
    }

    #[test]
    fn guarded_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in ADMIN_ROUTE_PATHS.iter().chain(EMPLOYEE_ROUTE_PATHS) {
            assert!(all.contains(path), "guarded path missing: {path}");
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
