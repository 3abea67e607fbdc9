use std::future::Future;

use leptos::*;

/// Runs `f` inside a fresh reactive runtime. Resources never fetch on the host.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    leptos_reactive::suppress_resource_load(true);
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    leptos_reactive::suppress_resource_load(false);
    result
}

/// Like [`with_runtime`] for tests that await gateway calls; signals created
/// inside `f` stay alive until the future settles.
pub async fn with_runtime_async<T, Fut>(f: impl FnOnce() -> Fut) -> T
where
    Fut: Future<Output = T>,
{
    let runtime = leptos::create_runtime();
    let result = f().await;
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    with_runtime(|| view().into_view().render_to_string().to_string())
}
