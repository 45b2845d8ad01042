use gloo_timers::callback::Interval;
use leptos::{ev::MouseEvent, *};

use crate::{
    components::layout::{ErrorMessage, SuccessMessage},
    pages::dashboard_employee::view_model::use_employee_dashboard_view_model,
    state::clock::{self, ClockMode},
    utils::time,
};

pub fn badge_for(mode: ClockMode) -> (&'static str, &'static str) {
    match mode {
        ClockMode::Out => (
            "Active",
            "bg-status-success-bg text-status-success-text border-status-success-border",
        ),
        ClockMode::In => (
            "Ready",
            "bg-status-info-bg text-status-info-text border-status-info-border",
        ),
        ClockMode::Unavailable => (
            "Unavailable",
            "bg-surface-muted text-fg-muted border-border",
        ),
    }
}

pub fn prompt_for(mode: ClockMode) -> &'static str {
    match mode {
        ClockMode::Out => "You are currently clocked in.",
        ClockMode::In => "You can clock in to today's shift.",
        ClockMode::Unavailable => "No shift available for clocking in today.",
    }
}

#[component]
pub fn ClockSection() -> impl IntoView {
    let vm = use_employee_dashboard_view_model();
    let (shifts, _) = vm.shifts;
    let mode = create_memo(move |_| clock::clock_mode(&shifts.get().shifts, time::today()));
    let pending = vm.clock_action.pending();
    let feedback = vm.clock_feedback;

    let (elapsed, set_elapsed) = create_signal("00:00:00".to_string());
    let ticker: StoredValue<Option<Interval>> = store_value(None);

    // Run the 1 Hz elapsed display only while a shift is active; the handle
    // is dropped (cancelling the interval) on mode changes and unmount.
    create_effect(move |_| {
        ticker.update_value(|handle| {
            handle.take();
        });
        if mode.get() == ClockMode::Out {
            let start = clock::ensure_start_instant();
            let tick = move || {
                let ms = (time::now_instant() - start).num_milliseconds();
                set_elapsed.set(time::format_elapsed(ms));
            };
            tick();
            ticker.set_value(Some(Interval::new(1_000, tick)));
        } else {
            set_elapsed.set("00:00:00".to_string());
        }
    });

    let on_clock_in = vm.handle_clock_in();
    let on_clock_out = vm.handle_clock_out();
    let on_click = move |ev: MouseEvent| match mode.get_untracked() {
        ClockMode::In => on_clock_in(ev),
        ClockMode::Out => on_clock_out(ev),
        ClockMode::Unavailable => {}
    };

    let button_label = move || match mode.get() {
        ClockMode::Out => "Clock out",
        _ => "Clock in",
    };
    let button_class = move || {
        if mode.get() == ClockMode::Out {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
        } else {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
        }
    };

    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <div class="flex justify-between items-center mb-3">
                <h2 class="text-lg font-semibold text-fg">"Clock in / out"</h2>
                {move || {
                    let (label, class) = badge_for(mode.get());
                    view! {
                        <span class=format!("px-2 py-1 rounded border text-xs font-medium {class}")>
                            {label}
                        </span>
                    }
                }}
            </div>
            {move || feedback.get().map(|result| match result {
                Ok(message) => view! { <SuccessMessage message=message /> }.into_view(),
                Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
            })}
            {move || shifts.get().error.map(|err| view! { <ErrorMessage message=err.message /> })}
            <p class="text-sm text-fg-muted mb-4">{move || prompt_for(mode.get())}</p>
            <Show when=move || mode.get() == ClockMode::Out>
                <div class="inline-block px-3 py-2 mb-4 bg-surface-muted border border-border rounded-md">
                    <p class="text-xs text-fg-muted">"Worked so far"</p>
                    <p class="text-lg font-bold font-mono text-fg">{elapsed}</p>
                </div>
            </Show>
            <div>
                <button
                    class=button_class
                    on:click=on_click
                    disabled=move || {
                        mode.get() == ClockMode::Unavailable || pending.get() || shifts.get().loading
                    }
                >
                    {button_label}
                </button>
            </div>
        </section>
    }
}
