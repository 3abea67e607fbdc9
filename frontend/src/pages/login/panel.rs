use leptos::{ev::SubmitEvent, *};

use super::utils::{validate_credentials, GENERIC_FAILURE};
use crate::{
    api::LoginRequest,
    components::common::Button,
    state::session::{use_login_action, LoginOutcome},
    utils::navigation::{navigate_to, DASHBOARD_PATH},
};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(LoginOutcome::SignedIn) => {
                    set_error.set(None);
                    navigate_to(DASHBOARD_PATH);
                }
                Ok(LoginOutcome::Rejected(msg)) => set_error.set(Some(msg)),
                Err(err) => {
                    log::warn!("Login failed: {}", err);
                    set_error.set(Some(GENERIC_FAILURE.to_string()));
                }
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if let Err(msg) = validate_credentials(&email, &password) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        login_action.dispatch(LoginRequest { email, password });
    };

    view! {
        <div class="auth-container">
            <form class="auth-form" on:submit=handle_submit>
                <h2 class="auth-title">"Welcome Back"</h2>
                {move || error.get().map(|msg| view! { <p class="form-error" role="alert">{msg}</p> })}
                <input
                    type="email"
                    placeholder="Email"
                    required=true
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required=true
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <Button attr:type="submit" loading=pending>"Login"</Button>
                <p class="auth-link-text">
                    "Don't have an account? "
                    <a href="/signup">"Sign up"</a>
                </p>
            </form>
        </div>
    }
}
