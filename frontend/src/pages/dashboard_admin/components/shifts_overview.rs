use leptos::*;

use crate::{
    components::{
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
    },
    state::resources::{ResourceStore, Shifts},
};

fn display_id(value: Option<i64>) -> String {
    value
        .map(|id| id.to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn ShiftsOverview() -> impl IntoView {
    let store: ResourceStore<Shifts> = ResourceStore::new();
    let state = store.state();

    {
        let store = store.clone();
        create_effect(move |_| {
            let store = store.clone();
            spawn_local(async move {
                store.ensure_fresh().await;
            });
        });
    }

    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <h2 class="text-lg font-semibold text-fg mb-3">"All shifts"</h2>
            {move || state.get().error.map(|err| view! { <ErrorMessage message=err.message /> })}
            {move || {
                let snapshot = state.get();
                if snapshot.loading && snapshot.items.is_empty() {
                    view! { <LoadingSpinner /> }.into_view()
                } else if snapshot.items.is_empty() {
                    view! { <EmptyState title="No shifts planned" /> }.into_view()
                } else {
                    view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full text-sm">
                                <thead>
                                    <tr class="text-left text-fg-muted border-b border-border">
                                        <th class="py-2 pr-4">"Date"</th>
                                        <th class="py-2 pr-4">"Employee"</th>
                                        <th class="py-2 pr-4">"Bicycle"</th>
                                        <th class="py-2 pr-4">"Route"</th>
                                        <th class="py-2 pr-4">"Start"</th>
                                        <th class="py-2 pr-4">"End"</th>
                                        <th class="py-2">"Hours"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {snapshot
                                        .items
                                        .into_iter()
                                        .map(|shift| view! {
                                            <tr class="border-b border-border text-fg">
                                                <td class="py-2 pr-4">{shift.date_of_shift.format("%Y-%m-%d").to_string()}</td>
                                                <td class="py-2 pr-4">{display_id(shift.employee_id)}</td>
                                                <td class="py-2 pr-4">{display_id(shift.bicycle_id)}</td>
                                                <td class="py-2 pr-4">{shift.route_id}</td>
                                                <td class="py-2 pr-4">{shift.start_time.clone().unwrap_or_else(|| "—".into())}</td>
                                                <td class="py-2 pr-4">{shift.end_time.clone().unwrap_or_else(|| "—".into())}</td>
                                                <td class="py-2">{shift.total_hours.map(|h| format!("{h:.2}")).unwrap_or_else(|| "—".into())}</td>
                                            </tr>
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}
