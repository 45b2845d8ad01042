use leptos::*;

use crate::{api::RouteInfo, components::empty_state::EmptyState};

#[component]
pub fn RoutesList(routes: Vec<RouteInfo>) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <h2 class="text-lg font-semibold text-fg mb-3">"My routes"</h2>
            {if routes.is_empty() {
                view! { <EmptyState title="No routes assigned" /> }.into_view()
            } else {
                view! {
                    <ul class="flex flex-wrap gap-2">
                        {routes
                            .into_iter()
                            .map(|route| view! {
                                <li class="px-3 py-1 rounded-full bg-surface-muted border border-border text-sm text-fg">
                                    {format!("Route {}", route.route_number)}
                                </li>
                            })
                            .collect_view()}
                    </ul>
                }
                .into_view()
            }}
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn lists_route_numbers() {
        let html = render_to_string(move || {
            let routes = vec![
                RouteInfo { id: 1, route_number: 12 },
                RouteInfo { id: 2, route_number: 7 },
            ];
            view! { <RoutesList routes=routes /> }
        });
        assert!(html.contains("Route 12"));
        assert!(html.contains("Route 7"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let html = render_to_string(move || view! { <RoutesList routes=Vec::new() /> });
        assert!(html.contains("No routes assigned"));
    }
}
