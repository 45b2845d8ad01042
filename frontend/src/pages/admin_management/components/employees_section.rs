use leptos::*;

use crate::{
    api::{ApiError, Employee, EmployeePayload},
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        forms::TextField,
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
    state::resources::{Employees, ResourceStore},
    utils::validation,
};

pub struct EmployeeFormInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub experience_level: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Validate the admin employee form. Creating an account requires sign-in
/// credentials; editing leaves them untouched unless refilled.
pub fn parse_employee_form(
    input: &EmployeeFormInput<'_>,
    creating: bool,
) -> Result<EmployeePayload, String> {
    let username = input.username.trim();
    let password = input.password.trim();
    if creating && (username.is_empty() || password.is_empty()) {
        return Err("Username and password are required for a new account".to_string());
    }
    Ok(EmployeePayload {
        first_name: validation::required(input.first_name, "First name")?,
        last_name: validation::required(input.last_name, "Last name")?,
        address: validation::required(input.address, "Address")?,
        phone: validation::required(input.phone, "Phone")?,
        email: validation::email(input.email)?,
        experience_level: validation::experience_level(input.experience_level)?,
        username: (!username.is_empty()).then(|| username.to_string()),
        password: (!password.is_empty()).then(|| password.to_string()),
    })
}

#[component]
pub fn EmployeesSection(store: ResourceStore<Employees>) -> impl IntoView {
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

    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let address = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let experience = create_rw_signal(String::from("1"));
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let editing = create_rw_signal(None::<i64>);
    let form_error = create_rw_signal(None::<String>);
    let feedback = create_rw_signal(None::<Result<String, ApiError>>);

    let clear_form = move || {
        first_name.set(String::new());
        last_name.set(String::new());
        address.set(String::new());
        phone.set(String::new());
        email.set(String::new());
        experience.set(String::from("1"));
        username.set(String::new());
        password.set(String::new());
        editing.set(None);
    };

    let save_action = {
        let store = store.clone();
        create_action(move |input: &(Option<i64>, EmployeePayload)| {
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
                        feedback.set(Some(Ok("Employee saved".to_string())));
                        clear_form();
                    }
                    Err(err) => feedback.set(Some(Err(err))),
                }
            }
        });
    }

    let delete_target = create_rw_signal(None::<Employee>);
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
                    Ok(()) => feedback.set(Some(Ok("Employee deleted".to_string()))),
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
        let creating = editing.get_untracked().is_none();
        let first = first_name.get_untracked();
        let last = last_name.get_untracked();
        let addr = address.get_untracked();
        let ph = phone.get_untracked();
        let mail = email.get_untracked();
        let exp = experience.get_untracked();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        let input = EmployeeFormInput {
            first_name: &first,
            last_name: &last,
            address: &addr,
            phone: &ph,
            email: &mail,
            experience_level: &exp,
            username: &user,
            password: &pass,
        };
        match parse_employee_form(&input, creating) {
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
            .map(|e| format!("{} {} will be removed.", e.first_name, e.last_name))
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
                    view! { <EmptyState title="No employees yet" /> }.into_view()
                } else {
                    view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full text-sm">
                                <thead>
                                    <tr class="text-left text-fg-muted border-b border-border">
                                        <th class="py-2 pr-4">"Name"</th>
                                        <th class="py-2 pr-4">"Email"</th>
                                        <th class="py-2 pr-4">"Phone"</th>
                                        <th class="py-2 pr-4">"Level"</th>
                                        <th class="py-2">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {snapshot
                                        .items
                                        .into_iter()
                                        .map(|employee| {
                                            let edit = employee.clone();
                                            let target = employee.clone();
                                            view! {
                                                <tr class="border-b border-border text-fg">
                                                    <td class="py-2 pr-4">{format!("{} {}", employee.first_name, employee.last_name)}</td>
                                                    <td class="py-2 pr-4">{employee.email.clone()}</td>
                                                    <td class="py-2 pr-4">{employee.phone.clone()}</td>
                                                    <td class="py-2 pr-4">
                                                        {employee
                                                            .experience_level
                                                            .map(|l| l.to_string())
                                                            .unwrap_or_else(|| "—".to_string())}
                                                    </td>
                                                    <td class="py-2 space-x-3">
                                                        <button
                                                            class="text-sm font-medium text-action-primary-bg hover:underline"
                                                            on:click=move |_| {
                                                                editing.set(Some(edit.employee_id));
                                                                first_name.set(edit.first_name.clone());
                                                                last_name.set(edit.last_name.clone());
                                                                address.set(edit.address.clone());
                                                                phone.set(edit.phone.clone());
                                                                email.set(edit.email.clone());
                                                                experience.set(
                                                                    edit.experience_level
                                                                        .map(|l| l.to_string())
                                                                        .unwrap_or_else(|| "1".to_string()),
                                                                );
                                                                username.set(String::new());
                                                                password.set(String::new());
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
                    {move || if editing.get().is_some() { "Edit employee" } else { "Add employee" }}
                </h3>
                {move || form_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                    <TextField label="First name" value=first_name />
                    <TextField label="Last name" value=last_name />
                    <TextField label="Address" value=address />
                    <TextField label="Phone" value=phone />
                    <TextField label="Email" value=email input_type="email" />
                    <TextField label="Experience level (1–5)" value=experience />
                    <TextField label="Username" value=username />
                    <TextField label="Password" value=password input_type="password" />
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
                title="Delete employee"
                message=dialog_message
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(employee) = delete_target.get_untracked() {
                        delete_action.dispatch(employee.employee_id);
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

    fn input<'a>(username: &'a str, password: &'a str) -> EmployeeFormInput<'a> {
        EmployeeFormInput {
            first_name: "Asta",
            last_name: "Berg",
            address: "Nørrebrogade 1",
            phone: "+45 11 22 33 44",
            email: "asta@go-card.dk",
            experience_level: "3",
            username,
            password,
        }
    }

    #[test]
    fn creating_requires_credentials() {
        assert!(parse_employee_form(&input("", ""), true).is_err());
        let payload = parse_employee_form(&input("asta", "hunter2"), true).unwrap();
        assert_eq!(payload.username.as_deref(), Some("asta"));
        assert_eq!(payload.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn editing_without_credentials_omits_them() {
        let payload = parse_employee_form(&input("", ""), false).unwrap();
        assert!(payload.username.is_none());
        assert!(payload.password.is_none());
        assert_eq!(payload.experience_level, 3);
    }

    #[test]
    fn experience_level_is_validated() {
        let mut bad = input("", "");
        bad.experience_level = "9";
        assert!(parse_employee_form(&bad, false).is_err());
    }
}
