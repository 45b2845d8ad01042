use leptos::*;

use crate::{
    api::{Employee, EmployeePayload},
    components::{
        forms::TextField,
        layout::ErrorMessage,
    },
    pages::dashboard_employee::view_model::use_employee_dashboard_view_model,
    utils::validation,
};

/// Validate the edit form into an update payload. Credentials and the
/// experience level are not editable from the profile card.
pub fn build_update_payload(
    first_name: &str,
    last_name: &str,
    address: &str,
    phone: &str,
    email: &str,
    experience_level: i32,
) -> Result<EmployeePayload, String> {
    Ok(EmployeePayload {
        first_name: validation::required(first_name, "First name")?,
        last_name: validation::required(last_name, "Last name")?,
        address: validation::required(address, "Address")?,
        phone: validation::required(phone, "Phone")?,
        email: validation::email(email)?,
        experience_level,
        username: None,
        password: None,
    })
}

#[component]
pub fn PersonalInfoCard(employee: Employee) -> impl IntoView {
    let vm = use_employee_dashboard_view_model();
    let edit_open = vm.edit_open;
    let employee_for_modal = employee.clone();

    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-6">
            <div class="flex justify-between items-center mb-3">
                <h2 class="text-lg font-semibold text-fg">"Profile"</h2>
                <button
                    class="text-sm font-medium text-action-primary-bg hover:underline"
                    on:click=move |_| edit_open.set(true)
                >
                    "Edit"
                </button>
            </div>
            <dl class="grid grid-cols-1 sm:grid-cols-2 gap-x-6 gap-y-2 text-sm">
                <div>
                    <dt class="text-fg-muted">"Name"</dt>
                    <dd class="text-fg">{format!("{} {}", employee.first_name, employee.last_name)}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">"Email"</dt>
                    <dd class="text-fg">{employee.email.clone()}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">"Phone"</dt>
                    <dd class="text-fg">{employee.phone.clone()}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">"Address"</dt>
                    <dd class="text-fg">{employee.address.clone()}</dd>
                </div>
                <div>
                    <dt class="text-fg-muted">"Experience level"</dt>
                    <dd class="text-fg">
                        {employee
                            .experience_level
                            .map(|level| level.to_string())
                            .unwrap_or_else(|| "—".to_string())}
                    </dd>
                </div>
            </dl>
            <EditPersonalInfoModal employee=employee_for_modal />
        </section>
    }
}

#[component]
pub fn EditPersonalInfoModal(employee: Employee) -> impl IntoView {
    let vm = use_employee_dashboard_view_model();
    let edit_open = vm.edit_open;
    let update_action = vm.update_action;
    let update_error = vm.update_error;
    let pending = update_action.pending();

    let first_name = create_rw_signal(employee.first_name.clone());
    let last_name = create_rw_signal(employee.last_name.clone());
    let address = create_rw_signal(employee.address.clone());
    let phone = create_rw_signal(employee.phone.clone());
    let email = create_rw_signal(employee.email.clone());
    let form_error = create_rw_signal(None::<String>);
    let experience_level = employee.experience_level.unwrap_or(1);

    let on_save = move |_| {
        if pending.get_untracked() {
            return;
        }
        match build_update_payload(
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &address.get_untracked(),
            &phone.get_untracked(),
            &email.get_untracked(),
            experience_level,
        ) {
            Ok(payload) => {
                form_error.set(None);
                update_action.dispatch(payload);
            }
            Err(message) => form_error.set(Some(message)),
        }
    };

    view! {
        <Show when=move || edit_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| edit_open.set(false)
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                >
                    <h2 class="text-lg font-semibold text-fg">"Edit personal info"</h2>
                    {move || form_error.get().map(|message| view! { <ErrorMessage message=message /> })}
                    {move || update_error.get().map(|err| view! { <ErrorMessage message=err.message /> })}
                    <div class="space-y-3">
                        <TextField label="First name" value=first_name />
                        <TextField label="Last name" value=last_name />
                        <TextField label="Address" value=address />
                        <TextField label="Phone" value=phone />
                        <TextField label="Email" value=email input_type="email" />
                    </div>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| edit_open.set(false)
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                            disabled=move || pending.get()
                            on:click=on_save
                        >
                            {move || if pending.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
