use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h3 class="empty-state-title">{title}</h3>
            {description.map(|desc| view! { <p class="empty-state-description">{desc}</p> })}
        </div>
    }
}
