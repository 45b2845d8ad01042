use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: String,
) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {(!description.is_empty()).then(|| view! {
                <p class="mt-1 text-sm text-fg-muted">{description}</p>
            })}
        </div>
    }
}
