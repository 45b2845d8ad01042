use leptos::*;

use crate::{api::MonthlyHoursRow, components::empty_state::EmptyState};

const CHART_HEIGHT: f64 = 120.0;
const BAR_WIDTH: f64 = 48.0;
const BAR_GAP: f64 = 24.0;

/// Bar heights scaled so the tallest month fills the chart.
pub fn bar_heights(rows: &[MonthlyHoursRow]) -> Vec<f64> {
    let max = rows
        .iter()
        .map(|r| r.total_monthly_hours)
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return rows.iter().map(|_| 0.0).collect();
    }
    rows.iter()
        .map(|r| (r.total_monthly_hours / max) * CHART_HEIGHT)
        .collect()
}

#[component]
pub fn WorkHoursChart(rows: Vec<MonthlyHoursRow>) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <h2 class="text-lg font-semibold text-fg mb-3">"Work hours"</h2>
            {if rows.is_empty() {
                view! { <EmptyState title="No hours recorded" description="Reports appear once shifts are completed." /> }
                    .into_view()
            } else {
                let heights = bar_heights(&rows);
                let width = rows.len() as f64 * (BAR_WIDTH + BAR_GAP);
                view! {
                    <svg
                        width=format!("{width}")
                        height=format!("{}", CHART_HEIGHT + 40.0)
                        role="img"
                        aria-label="Monthly work hours"
                    >
                        {rows
                            .iter()
                            .zip(heights)
                            .enumerate()
                            .map(|(i, (row, height))| {
                                let x = i as f64 * (BAR_WIDTH + BAR_GAP) + BAR_GAP / 2.0;
                                let y = CHART_HEIGHT - height;
                                view! {
                                    <g>
                                        <rect
                                            x=format!("{x}")
                                            y=format!("{y}")
                                            width=format!("{BAR_WIDTH}")
                                            height=format!("{height}")
                                            class="fill-action-primary-bg"
                                            rx="4"
                                        />
                                        <text
                                            x=format!("{}", x + BAR_WIDTH / 2.0)
                                            y=format!("{}", CHART_HEIGHT + 16.0)
                                            text-anchor="middle"
                                            class="fill-fg-muted text-xs"
                                        >
                                            {format!("{}/{}", row.month, row.year)}
                                        </text>
                                        <text
                                            x=format!("{}", x + BAR_WIDTH / 2.0)
                                            y=format!("{}", CHART_HEIGHT + 32.0)
                                            text-anchor="middle"
                                            class="fill-fg text-xs"
                                        >
                                            {format!("{:.1} h", row.total_monthly_hours)}
                                        </text>
                                    </g>
                                }
                            })
                            .collect_view()}
                    </svg>
                }
                .into_view()
            }}
        </section>
    }
}
