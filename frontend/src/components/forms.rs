use leptos::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] input_type: String,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let input_type = if input_type.is_empty() {
        "text".to_string()
    } else {
        input_type
    };
    view! {
        <label class="block">
            <span class="block text-sm font-medium text-fg-muted mb-1">{label}</span>
            <input
                type=input_type
                class="w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-bg"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="inline-flex items-center gap-2 text-sm text-fg">
            <input
                type="checkbox"
                class="rounded border-border"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn text_field_renders_label_and_placeholder() {
        let html = render_to_string(move || {
            let value = create_rw_signal(String::new());
            view! { <TextField label="Route number" value=value placeholder="e.g. 12" /> }
        });
        assert!(html.contains("Route number"));
        assert!(html.contains("e.g. 12"));
    }

    #[test]
    fn text_field_defaults_to_text_type() {
        let html = render_to_string(move || {
            let value = create_rw_signal(String::new());
            view! { <TextField label="Username" value=value /> }
        });
        assert!(html.contains("type=\"text\""));
    }

    #[test]
    fn checkbox_field_renders_label() {
        let html = render_to_string(move || {
            let value = create_rw_signal(true);
            view! { <CheckboxField label="In operation" value=value /> }
        });
        assert!(html.contains("In operation"));
        assert!(html.contains("type=\"checkbox\""));
    }
}
