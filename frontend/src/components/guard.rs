use crate::{state::session::use_session, utils::navigation::redirect_to_login_if_needed};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session().read_only();
    let is_authenticated = create_memo(move |_| session.with(Option::is_some));
    create_effect(move |_| {
        if !is_authenticated.get() {
            redirect_to_login_if_needed();
        }
    });
    view! {
        <Show when=move || is_authenticated.get() fallback=|| ()>
            {children()}
        </Show>
    }
}
