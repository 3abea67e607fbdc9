use leptos::{ev::SubmitEvent, *};

use super::{repository::save_profile, utils::ProfileForm};
use crate::{
    api::{use_api_client, ApiError, ProfileUpdate},
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
    },
    state::session::use_session,
};

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let api = use_api_client();
    let store = use_session();
    let form = create_rw_signal(ProfileForm::from_session(
        store.current_untracked().as_ref(),
    ));
    let error = create_rw_signal(None::<ApiError>);
    let saved = create_rw_signal(false);

    let save_action = create_action(move |update: &ProfileUpdate| {
        let api = api.clone();
        let store = store.clone();
        let update = update.clone();
        async move { save_profile(&api, &store, &update).await }
    });
    let pending = save_action.pending();

    create_effect(move |_| match save_action.value().get() {
        Some(Ok(())) => {
            error.set(None);
            saved.set(true);
            form.update(|f| {
                if f.change_password {
                    f.toggle_password_change();
                }
            });
        }
        Some(Err(err)) => {
            saved.set(false);
            error.set(Some(err));
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        saved.set(false);
        save_action.dispatch(form.get_untracked().to_update());
    };

    view! {
        <section class="profile-panel">
            <form class="profile-form" on:submit=on_submit>
                <label>
                    "First Name"
                    <input
                        type="text"
                        prop:value=move || form.get().first_name
                        on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Last Name"
                    <input
                        type="text"
                        prop:value=move || form.get().last_name
                        on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </label>
                <div class="password-section">
                    <Button
                        variant=ButtonVariant::Secondary
                        attr:type="button"
                        on:click=move |_| form.update(ProfileForm::toggle_password_change)
                    >
                        {move || {
                            if form.get().change_password {
                                "Cancel Password Change"
                            } else {
                                "Change Password"
                            }
                        }}
                    </Button>
                    <Show when=move || form.get().change_password>
                        <label>
                            "Old Password"
                            <input
                                type="password"
                                prop:value=move || form.get().old_password
                                on:input=move |ev| form.update(|f| f.old_password = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "New Password"
                            <input
                                type="password"
                                prop:value=move || form.get().new_password
                                on:input=move |ev| form.update(|f| f.new_password = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                </div>
                <InlineErrorMessage error=error />
                <Show when=move || saved.get()>
                    <p class="form-success" role="status">"Profile updated."</p>
                </Show>
                <Button attr:type="submit" loading=pending>
                    "Save Changes"
                </Button>
            </form>
        </section>
    }
}
