use chrono::NaiveDate;
use leptos::*;

use crate::{
    api::{ApiError, Shift, ShiftPayload},
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        forms::TextField,
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
    state::resources::{ResourceStore, Shifts},
    utils::validation,
};

pub struct ShiftFormInput<'a> {
    pub date: &'a str,
    pub employee_id: &'a str,
    pub bicycle_id: &'a str,
    pub route_id: &'a str,
    pub substituted_id: &'a str,
}

/// Validate the shift planning form. A blank substitute defaults to the
/// assigned employee.
pub fn parse_shift_form(input: &ShiftFormInput<'_>) -> Result<ShiftPayload, String> {
    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;
    let employee_id = validation::positive_number(input.employee_id, "Employee id")?;
    let substituted_id = if input.substituted_id.trim().is_empty() {
        employee_id
    } else {
        validation::positive_number(input.substituted_id, "Substitute id")?
    };
    Ok(ShiftPayload {
        date_of_shift: date,
        employee_id,
        bicycle_id: validation::positive_number(input.bicycle_id, "Bicycle id")?,
        route_id: validation::positive_number(input.route_id, "Route id")?,
        substituted_id,
    })
}

#[component]
pub fn ShiftsSection(store: ResourceStore<Shifts>) -> impl IntoView {
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

    let date = create_rw_signal(String::new());
    let employee_id = create_rw_signal(String::new());
    let bicycle_id = create_rw_signal(String::new());
    let route_id = create_rw_signal(String::new());
    let substituted_id = create_rw_signal(String::new());
    let editing = create_rw_signal(None::<i64>);
    let form_error = create_rw_signal(None::<String>);
    let feedback = create_rw_signal(None::<Result<String, ApiError>>);

    let clear_form = move || {
        date.set(String::new());
        employee_id.set(String::new());
        bicycle_id.set(String::new());
        route_id.set(String::new());
        substituted_id.set(String::new());
        editing.set(None);
    };

    let save_action = {
        let store = store.clone();
        create_action(move |input: &(Option<i64>, ShiftPayload)| {
            let store = store.clone();
            let (id, payload) = input.clone();
            async move {
                match id {
                    Some(id) => store.update(id, payload).await,
                    None => store.create(payload).await,
                }
            }
        })
    };
    {
        create_effect(move |_| {
            if let Some(result) = save_action.value().get() {
                match result {
                    Ok(()) => {
                        feedback.set(Some(Ok("Shift saved".to_string())));
                        clear_form();
                    }
                    Err(err) => feedback.set(Some(Err(err))),
                }
            }
        });
    }

    let delete_target = create_rw_signal(None::<Shift>);
    let delete_action = {
        let store = store.clone();
        create_action(move |id: &i64| {
            let store = store.clone();
            let id = *id;
            async move { store.remove(id).await }
        })
    };
    {
        create_effect(move |_| {
            if let Some(result) = delete_action.value().get() {
                delete_target.set(None);
                match result {
                    Ok(()) => feedback.set(Some(Ok("Shift deleted".to_string()))),
                    Err(err) => feedback.set(Some(Err(err))),
                }
            }
        });
    }

    let pending = save_action.pending();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let date_raw = date.get_untracked();
        let employee_raw = employee_id.get_untracked();
        let bicycle_raw = bicycle_id.get_untracked();
        let route_raw = route_id.get_untracked();
        let substitute_raw = substituted_id.get_untracked();
        let input = ShiftFormInput {
            date: &date_raw,
            employee_id: &employee_raw,
            bicycle_id: &bicycle_raw,
            route_id: &route_raw,
            substituted_id: &substitute_raw,
        };
        match parse_shift_form(&input) {
            Ok(payload) => {
                form_error.set(None);
                feedback.set(None);
                save_action.dispatch((editing.get_untracked(), payload));
            }
            Err(message) => form_error.set(Some(message)),
        }
    };

    let dialog_open = Signal::derive(move || delete_target.get().is_some());
    let dialog_message = Signal::derive(move || {
        delete_target
            .get()
            .map(|s| format!("The shift on {} will be removed.", s.date_of_shift))
            .unwrap_or_default()
    });

    view! {
        <div class="space-y-4">
            {move || feedback.get().map(|result| match result {
                Ok(message) => view! { <SuccessMessage message=message /> }.into_view(),
                Err(err) => view! { <ErrorMessage message=err.message /> }.into_view(),
            })}
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
                                        <th class="py-2 pr-4">"Substitute"</th>
                                        <th class="py-2">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {snapshot
                                        .items
                                        .into_iter()
                                        .map(|shift| {
                                            let edit = shift.clone();
                                            let target = shift.clone();
                                            view! {
                                                <tr class="border-b border-border text-fg">
                                                    <td class="py-2 pr-4">{shift.date_of_shift.format("%Y-%m-%d").to_string()}</td>
                                                    <td class="py-2 pr-4">{shift.employee_id.map(|id| id.to_string()).unwrap_or_else(|| "—".into())}</td>
                                                    <td class="py-2 pr-4">{shift.bicycle_id.map(|id| id.to_string()).unwrap_or_else(|| "—".into())}</td>
                                                    <td class="py-2 pr-4">{shift.route_id}</td>
                                                    <td class="py-2 pr-4">{shift.substituted_id.map(|id| id.to_string()).unwrap_or_else(|| "—".into())}</td>
                                                    <td class="py-2 space-x-3">
                                                        <button
                                                            class="text-sm font-medium text-action-primary-bg hover:underline"
                                                            on:click=move |_| {
                                                                editing.set(Some(edit.shift_id));
                                                                date.set(edit.date_of_shift.format("%Y-%m-%d").to_string());
                                                                employee_id.set(edit.employee_id.map(|id| id.to_string()).unwrap_or_default());
                                                                bicycle_id.set(edit.bicycle_id.map(|id| id.to_string()).unwrap_or_default());
                                                                route_id.set(edit.route_id.to_string());
                                                                substituted_id.set(edit.substituted_id.map(|id| id.to_string()).unwrap_or_default());
                                                            }
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <button
                                                            class="text-sm font-medium text-action-danger-bg hover:underline"
                                                            on:click=move |_| delete_target.set(Some(target.clone()))
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }
                    .into_view()
                }
            }}
            <form on:submit=on_submit class="space-y-3 max-w-lg">
                <h3 class="text-sm font-semibold text-fg">
                    {move || if editing.get().is_some() { "Edit shift" } else { "Plan shift" }}
                </h3>
                {move || form_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                    <TextField label="Date" value=date placeholder="YYYY-MM-DD" />
                    <TextField label="Employee id" value=employee_id />
                    <TextField label="Bicycle id" value=bicycle_id />
                    <TextField label="Route id" value=route_id />
                    <TextField label="Substitute id (optional)" value=substituted_id />
                </div>
                <div class="flex gap-2">
                    <button
                        type="submit"
                        class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Saving..." } else { "Save" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| clear_form()
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
            <ConfirmDialog
                is_open=dialog_open
                title="Delete shift"
                message=dialog_message
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(shift) = delete_target.get_untracked() {
                        delete_action.dispatch(shift.shift_id);
                    }
                })
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}
