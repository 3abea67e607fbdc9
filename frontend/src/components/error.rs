use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="alert alert-error" role="alert">
                <div class="alert-title">{move || error.get().map(|e| e.to_string()).unwrap_or_default()}</div>
                {move || {
                    error
                        .get()
                        .map(|e| view! { <div class="alert-code">{"Code: "}{e.code()}</div> }.into_view())
                        .unwrap_or_else(|| ().into_view())
                }}
            </div>
        </Show>
    }
}
