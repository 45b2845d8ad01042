use leptos::*;
use leptos_meta::Title;

use super::components::shifts_overview::ShiftsOverview;
use crate::{
    components::{layout::Layout, weather::WeatherSection},
    state::session::use_session,
};

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (session, _) = use_session();
    let greeting = move || {
        session
            .get()
            .username
            .map(|name| format!("Welcome, {name}!"))
            .unwrap_or_else(|| "Welcome!".to_string())
    };

    view! {
        <Title text="Go-card - Admin dashboard"/>
        <Layout>
            <div class="space-y-6 px-4 sm:px-0">
                <section class="bg-surface-elevated border border-border rounded-lg p-6">
                    <h2 class="text-xl font-semibold text-fg mb-1">{greeting}</h2>
                    <p class="text-sm text-fg-muted">
                        "Manage employees, bicycles, routes and shifts from the "
                        <a href="/admin/management" class="text-action-primary-bg hover:underline">
                            "management page"
                        </a>
                        "."
                    </p>
                </section>
                <WeatherSection />
                <ShiftsOverview />
            </div>
        </Layout>
    }
}
