use leptos::{ev::SubmitEvent, *};

use super::{
    repository::{signup, SignupOutcome},
    utils::validate_signup,
};
use crate::{
    api::{use_api_client, SignupRequest},
    components::common::Button,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Success(String),
    Failure(String),
}

#[component]
pub fn SignupPanel() -> impl IntoView {
    let api = use_api_client();
    let form = create_rw_signal(SignupRequest {
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        password: String::new(),
    });
    let notice = create_rw_signal(None::<Notice>);

    let signup_action = create_action(move |request: &SignupRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { signup(&api, &request).await }
    });
    let pending = signup_action.pending();

    create_effect(move |_| match signup_action.value().get() {
        Some(Ok(SignupOutcome::Created)) => {
            notice.set(Some(Notice::Success(
                "Signup successful! Please login.".into(),
            )));
            form.update(|f| {
                f.first_name.clear();
                f.last_name.clear();
                f.email.clear();
                f.password.clear();
            });
        }
        Some(Ok(SignupOutcome::Rejected(msg))) => notice.set(Some(Notice::Failure(msg))),
        Some(Err(err)) => {
            log::warn!("Signup error: {}", err);
            notice.set(Some(Notice::Failure(
                "Error connecting to the server. Please try again later.".into(),
            )));
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let request = form.get_untracked();
        match validate_signup(&request) {
            Ok(()) => {
                notice.set(None);
                signup_action.dispatch(request);
            }
            Err(msg) => notice.set(Some(Notice::Failure(msg))),
        }
    };

    view! {
        <div class="auth-container">
            <form class="auth-form" on:submit=on_submit>
                <h2 class="auth-title">"Create Account"</h2>
                {move || notice.get().map(|notice| match notice {
                    Notice::Success(msg) => view! { <p class="form-success" role="status">{msg}</p> },
                    Notice::Failure(msg) => view! { <p class="form-error" role="alert">{msg}</p> },
                })}
                <input
                    type="text"
                    placeholder="Firstname"
                    prop:value=move || form.get().first_name
                    on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Lastname"
                    prop:value=move || form.get().last_name
                    on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || form.get().email
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.get().password
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <Button attr:type="submit" loading=pending>"Sign Up"</Button>
                <p class="auth-link-text">
                    "Already have an account? "
                    <a href="/login">"Login"</a>
                </p>
            </form>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_session;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn signup_panel_renders_all_fields() {
        let html = render_to_string(move || {
            provide_session(None);
            view! { <SignupPanel /> }
        });
        for placeholder in ["Firstname", "Lastname", "Email", "Password"] {
            assert!(html.contains(placeholder));
        }
        assert!(html.contains("href=\"/login\""));
    }
}
