use leptos::ev::KeyboardEvent;
use leptos::*;

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_button_class = if destructive {
        "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
    } else {
        "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
    };

    let title_text = Signal::derive(move || title.get());
    let message_text = Signal::derive(move || message.get());

    let cancel_on_backdrop = on_cancel;
    let cancel_on_esc = on_cancel;
    let cancel_on_footer_button = on_cancel;
    let confirm_on_footer_button = on_confirm;

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| cancel_on_backdrop.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            cancel_on_esc.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title_text.get()}</h2>
                    <p class="text-sm text-fg-muted">{move || message_text.get()}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| cancel_on_footer_button.call(())
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class=confirm_button_class
                            on:click=move |_| confirm_on_footer_button.call(())
                        >
                            "Confirm"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_title_and_message_when_open() {
        let html = render_to_string(move || {
            let is_open = Signal::derive(|| true);
            view! {
                <ConfirmDialog
                    is_open=is_open
                    title="Delete bicycle"
                    message="Bicycle 12 will be removed."
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    destructive=true
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Delete bicycle"));
        assert!(html.contains("Bicycle 12 will be removed."));
    }

    #[test]
    fn renders_nothing_when_closed() {
        let html = render_to_string(move || {
            let is_open = Signal::derive(|| false);
            view! {
                <ConfirmDialog
                    is_open=is_open
                    title="Delete bicycle"
                    message="gone"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("Delete bicycle"));
    }
}
