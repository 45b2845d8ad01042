use leptos::*;

use crate::{
    api::{ApiError, Bicycle, BicyclePayload},
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        forms::{CheckboxField, TextField},
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
    state::resources::{Bicycles, ResourceStore},
    utils::validation,
};

pub fn parse_bicycle_form(number: &str, in_operate: bool) -> Result<BicyclePayload, String> {
    Ok(BicyclePayload {
        bicycle_number: validation::positive_number(number, "Bicycle number")?,
        in_operate,
    })
}

#[component]
pub fn BicyclesSection(store: ResourceStore<Bicycles>) -> impl IntoView {
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

    let number = create_rw_signal(String::new());
    let in_operate = create_rw_signal(true);
    let editing = create_rw_signal(None::<i64>);
    let form_error = create_rw_signal(None::<String>);
    let feedback = create_rw_signal(None::<Result<String, ApiError>>);

    let save_action = {
        let store = store.clone();
        create_action(move |input: &(Option<i64>, BicyclePayload)| {
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
                        feedback.set(Some(Ok("Bicycle saved".to_string())));
                        number.set(String::new());
                        in_operate.set(true);
                        editing.set(None);
                    }
                    Err(err) => feedback.set(Some(Err(err))),
                }
            }
        });
    }

    let delete_target = create_rw_signal(None::<Bicycle>);
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
                    Ok(()) => feedback.set(Some(Ok("Bicycle deleted".to_string()))),
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
        match parse_bicycle_form(&number.get_untracked(), in_operate.get_untracked()) {
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
            .map(|b| format!("Bicycle {} will be removed.", b.bicycle_number))
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
                    view! { <EmptyState title="No bicycles registered" /> }.into_view()
                } else {
                    view! {
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="py-2 pr-4">"Number"</th>
                                    <th class="py-2 pr-4">"In operation"</th>
                                    <th class="py-2">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {snapshot
                                    .items
                                    .into_iter()
                                    .map(|bicycle| {
                                        let edit = bicycle.clone();
                                        let target = bicycle.clone();
                                        view! {
                                            <tr class="border-b border-border text-fg">
                                                <td class="py-2 pr-4">{bicycle.bicycle_number}</td>
                                                <td class="py-2 pr-4">{if bicycle.in_operate { "Yes" } else { "No" }}</td>
                                                <td class="py-2 space-x-3">
                                                    <button
                                                        class="text-sm font-medium text-action-primary-bg hover:underline"
                                                        on:click=move |_| {
                                                            editing.set(Some(edit.bicycle_id));
                                                            number.set(edit.bicycle_number.to_string());
                                                            in_operate.set(edit.in_operate);
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
                    }
                    .into_view()
                }
            }}
            <form on:submit=on_submit class="space-y-3 max-w-sm">
                <h3 class="text-sm font-semibold text-fg">
                    {move || if editing.get().is_some() { "Edit bicycle" } else { "Add bicycle" }}
                </h3>
                {move || form_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <TextField label="Bicycle number" value=number placeholder="e.g. 12" />
                <CheckboxField label="In operation" value=in_operate />
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
                            on:click=move |_| {
                                editing.set(None);
                                number.set(String::new());
                                in_operate.set(true);
                            }
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
            <ConfirmDialog
                is_open=dialog_open
                title="Delete bicycle"
                message=dialog_message
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(bicycle) = delete_target.get_untracked() {
                        delete_action.dispatch(bicycle.bicycle_id);
                    }
                })
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bicycle_form_requires_a_positive_number() {
        assert!(parse_bicycle_form("", true).is_err());
        assert!(parse_bicycle_form("abc", true).is_err());
        assert!(parse_bicycle_form("0", true).is_err());
        let payload = parse_bicycle_form("12", false).unwrap();
        assert_eq!(payload.bicycle_number, 12);
        assert!(!payload.in_operate);
    }
}
