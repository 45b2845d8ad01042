use leptos::*;
use leptos_meta::Title;

use super::components::{
    bicycles_section::BicyclesSection, employees_section::EmployeesSection,
    routes_section::RoutesSection, shifts_section::ShiftsSection,
};
use super::view_model::use_management_view_model;
use crate::components::layout::Layout;

#[component]
pub fn AdminManagementPage() -> impl IntoView {
    let vm = use_management_view_model();
    let employees = vm.employees.clone();
    let bicycles = vm.bicycles.clone();
    let routes = vm.routes.clone();
    let shifts = vm.shifts.clone();

    view! {
        <Title text="Go-card - Management"/>
        <Layout>
            <div class="space-y-8 px-4 sm:px-0">
                <section id="section-employees">
                    <h2 class="text-lg font-semibold text-fg mb-3">"Employees"</h2>
                    <EmployeesSection store=employees />
                </section>
                <section id="section-bicycles">
                    <h2 class="text-lg font-semibold text-fg mb-3">"Bicycles"</h2>
                    <BicyclesSection store=bicycles />
                </section>
                <section id="section-routes">
                    <h2 class="text-lg font-semibold text-fg mb-3">"Routes"</h2>
                    <RoutesSection store=routes />
                </section>
                <section id="section-shifts">
                    <h2 class="text-lg font-semibold text-fg mb-3">"Shifts"</h2>
                    <ShiftsSection store=shifts />
                </section>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::Role;
    use crate::test_support::helpers::provide_session_with_role;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_all_management_sections() {
        let html = render_to_string(move || {
            provide_session_with_role(Role::Admin);
            view! { <AdminManagementPage /> }
        });
        assert!(html.contains("section-employees"));
        assert!(html.contains("section-bicycles"));
        assert!(html.contains("section-routes"));
        assert!(html.contains("section-shifts"));
    }
}
