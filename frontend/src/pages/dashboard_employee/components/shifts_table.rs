use leptos::*;

use crate::{api::Shift, components::empty_state::EmptyState};

fn display_time(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

fn display_hours(value: Option<f64>) -> String {
    value
        .map(|hours| format!("{hours:.2}"))
        .unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn ShiftsTable(shifts: Vec<Shift>) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <h2 class="text-lg font-semibold text-fg mb-3">"My shifts"</h2>
            {if shifts.is_empty() {
                view! { <EmptyState title="No shifts" description="Nothing has been planned for you yet." /> }
                    .into_view()
            } else {
                view! {
                    <div class="overflow-x-auto">
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="py-2 pr-4">"Date"</th>
                                    <th class="py-2 pr-4">"Route"</th>
                                    <th class="py-2 pr-4">"Start"</th>
                                    <th class="py-2 pr-4">"End"</th>
                                    <th class="py-2">"Hours"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {shifts
                                    .into_iter()
                                    .map(|shift| view! {
                                        <tr class="border-b border-border text-fg">
                                            <td class="py-2 pr-4">{shift.date_of_shift.format("%Y-%m-%d").to_string()}</td>
                                            <td class="py-2 pr-4">{shift.route_id}</td>
                                            <td class="py-2 pr-4">{display_time(&shift.start_time)}</td>
                                            <td class="py-2 pr-4">{display_time(&shift.end_time)}</td>
                                            <td class="py-2">{display_hours(shift.total_hours)}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_view()
            }}
        </section>
    }
}
