//! Host-side render harness. Every helper runs inside a throwaway reactive
//! runtime so tests cannot leak signals or contexts into each other.

use leptos::*;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    let value = f();
    runtime.dispose();
    value
}

/// Render a view to its SSR HTML snapshot. Resource loading is suppressed
/// so `Suspense` blocks render their fallback deterministically.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(move || view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}
