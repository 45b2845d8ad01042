use leptos::*;

use crate::{
    api::{ApiError, RouteInfo, RoutePayload},
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        forms::TextField,
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
    state::resources::{ResourceStore, Routes},
    utils::validation,
};

pub fn parse_route_form(number: &str) -> Result<RoutePayload, String> {
    Ok(RoutePayload {
        route_number: validation::positive_number(number, "Route number")?,
    })
}

#[component]
pub fn RoutesSection(store: ResourceStore<Routes>) -> impl IntoView {
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
    let editing = create_rw_signal(None::<i64>);
    let form_error = create_rw_signal(None::<String>);
    let feedback = create_rw_signal(None::<Result<String, ApiError>>);

    let save_action = {
        let store = store.clone();
        create_action(move |input: &(Option<i64>, RoutePayload)| {
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
                        feedback.set(Some(Ok("Route saved".to_string())));
                        number.set(String::new());
                        editing.set(None);
                    }
                    Err(err) => feedback.set(Some(Err(err))),
                }
            }
        });
    }

    let delete_target = create_rw_signal(None::<RouteInfo>);
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
                    Ok(()) => feedback.set(Some(Ok("Route deleted".to_string()))),
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
        match parse_route_form(&number.get_untracked()) {
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
            .map(|r| format!("Route {} will be removed.", r.route_number))
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
                    view! { <EmptyState title="No routes defined" /> }.into_view()
                } else {
                    view! {
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="py-2 pr-4">"Route number"</th>
                                    <th class="py-2">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {snapshot
                                    .items
                                    .into_iter()
                                    .map(|route| {
                                        let target = route.clone();
                                        view! {
                                            <tr class="border-b border-border text-fg">
                                                <td class="py-2 pr-4">{route.route_number}</td>
                                                <td class="py-2 space-x-3">
                                                    <button
                                                        class="text-sm font-medium text-action-primary-bg hover:underline"
                                                        on:click=move |_| {
                                                            editing.set(Some(route.id));
                                                            number.set(route.route_number.to_string());
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
                    {move || if editing.get().is_some() { "Edit route" } else { "Add route" }}
                </h3>
                {move || form_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <TextField label="Route number" value=number placeholder="e.g. 7" />
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
                            }
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
            <ConfirmDialog
                is_open=dialog_open
                title="Delete route"
                message=dialog_message
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(route) = delete_target.get_untracked() {
                        delete_action.dispatch(route.id);
                    }
                })
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}
