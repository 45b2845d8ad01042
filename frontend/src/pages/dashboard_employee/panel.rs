use leptos::*;
use leptos_meta::Title;

use super::components::{
    clock_section::ClockSection, personal_info::PersonalInfoCard, routes_list::RoutesList,
    shifts_table::ShiftsTable, work_hours_chart::WorkHoursChart,
};
use super::view_model::use_employee_dashboard_view_model;
use crate::components::{
    layout::{ErrorMessage, Layout, LoadingSpinner},
    weather::WeatherSection,
};

#[component]
pub fn EmployeeDashboardPage() -> impl IntoView {
    let vm = use_employee_dashboard_view_model();
    let profile = vm.profile_resource;
    let routes = vm.routes_resource;
    let hours = vm.hours_resource;
    let (shifts, _) = vm.shifts;

    view! {
        <Title text="Go-card - Employee dashboard"/>
        <Layout>
            <div class="space-y-6 px-4 sm:px-0">
                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    {move || profile.get().map(|result| match result {
                        Ok(employee) => view! { <PersonalInfoCard employee=employee /> }.into_view(),
                        Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
                    })}
                </Suspense>

                <ClockSection />

                {move || {
                    let state = shifts.get();
                    if state.loading {
                        view! { <LoadingSpinner /> }.into_view()
                    } else {
                        view! { <ShiftsTable shifts=state.shifts /> }.into_view()
                    }
                }}

                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    {move || hours.get().map(|result| match result {
                        Ok(rows) => view! { <WorkHoursChart rows=rows /> }.into_view(),
                        Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
                    })}
                </Suspense>

                <WeatherSection />

                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    {move || routes.get().map(|result| match result {
                        Ok(routes) => view! { <RoutesList routes=routes /> }.into_view(),
                        Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
                    })}
                </Suspense>
            </div>
        </Layout>
    }
}
