use leptos::{ev::Event, *};
use wasm_bindgen_futures::JsFuture;

use super::{
    utils::{describe_boundary, parse_geojson},
    view_model::FarmsViewModel,
};
use crate::{
    api::Farm,
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::LoadingSpinner,
    },
    state::session::use_session,
};

async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|err| format!("Error reading GeoJSON file: {:?}", err))?;
    value
        .as_string()
        .ok_or_else(|| "Error reading GeoJSON file".to_string())
}

#[component]
pub fn FarmsPanel() -> impl IntoView {
    let vm = FarmsViewModel::new();
    let store = use_session();
    let loading = vm.farms_resource.loading();

    let on_add = move |_| vm.open_create();

    view! {
        <section class="farms-panel">
            <div class="panel-toolbar">
                <Button on:click=on_add>"Add a New Farm"</Button>
            </div>
            <InlineErrorMessage error=vm.error />
            <Show when=move || loading.get()>
                <LoadingSpinner label="Loading farms..." />
            </Show>
            <Show
                when=move || !vm.farms.get().is_empty()
                fallback=|| view! {
                    <EmptyState
                        title="No farms yet"
                        description="Add a farm and import its boundary from a GeoJSON file."
                    />
                }
            >
                <div class="farm-grid">
                    <For
                        each=move || vm.farms.get()
                        key=|farm| farm.id.clone()
                        children=move |farm| view! { <FarmCard farm=farm vm=vm /> }
                    />
                </div>
            </Show>
            <FarmFormModal vm=vm on_submit=Callback::new(move |_| vm.submit(store.user_id())) />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_delete.get().is_some())
                title="Delete farm"
                message=Signal::derive(move || {
                    vm.pending_delete
                        .get()
                        .map(|farm| format!("Are you sure you want to delete {}?", farm.name))
                        .unwrap_or_default()
                })
                confirm_label="Delete"
                confirm_disabled=vm.delete_action.pending()
                destructive=true
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
            />
        </section>
    }
}

#[component]
fn FarmCard(farm: Farm, vm: FarmsViewModel) -> impl IntoView {
    let edit_target = farm.clone();
    let delete_target = farm.clone();

    view! {
        <article class="farm-card">
            <h3 class="farm-card-title">{farm.name.clone()}</h3>
            <p class="farm-card-location">{farm.location.clone()}</p>
            <p class="farm-card-boundary">{describe_boundary(&farm.boundaries)}</p>
            {farm.description.clone().filter(|d| !d.is_empty()).map(|description| view! {
                <p class="farm-card-description">{description}</p>
            })}
            <div class="farm-card-actions">
                <Button
                    variant=ButtonVariant::Secondary
                    on:click=move |_| vm.open_edit(&edit_target)
                >
                    "Edit"
                </Button>
                <Button
                    variant=ButtonVariant::Danger
                    on:click=move |_| vm.pending_delete.set(Some(delete_target.clone()))
                >
                    "Delete"
                </Button>
            </div>
        </article>
    }
}

#[component]
fn FarmFormModal(vm: FarmsViewModel, on_submit: Callback<()>) -> impl IntoView {
    let saving = vm.save_action.pending();
    let title = move || {
        if vm.editing_id.get().is_some() {
            "Edit Farm"
        } else {
            "Add a New Farm"
        }
    };

    let on_file = move |ev: Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match read_file_text(file).await.and_then(|text| parse_geojson(&text)) {
                Ok(boundary) => {
                    vm.form_error.set(None);
                    vm.draft.update(|draft| draft.boundaries = boundary);
                }
                Err(msg) => {
                    log::warn!("GeoJSON import failed: {}", msg);
                    vm.form_error.set(Some(msg));
                }
            }
        });
    };

    view! {
        <Show when=move || vm.form_open.get()>
            <div class="modal-overlay">
                <form
                    class="modal farm-form"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        if !saving.get_untracked() {
                            on_submit.call(());
                        }
                    }
                >
                    <h3 class="modal-title">{title}</h3>
                    <label>
                        "Farm name"
                        <input
                            type="text"
                            prop:value=move || vm.draft.get().name
                            on:input=move |ev| vm.draft.update(|d| d.name = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Location"
                        <input
                            type="text"
                            prop:value=move || vm.draft.get().location
                            on:input=move |ev| vm.draft.update(|d| d.location = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Description"
                        <textarea
                            prop:value=move || vm.draft.get().description
                            on:input=move |ev| vm.draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Boundary (GeoJSON)"
                        <input type="file" accept=".geojson,.json,application/geo+json" on:change=on_file />
                    </label>
                    <p class="farm-form-boundary">
                        {move || describe_boundary(&vm.draft.get().boundaries)}
                    </p>
                    {move || vm.form_error.get().map(|msg| view! {
                        <p class="form-error" role="alert">{msg}</p>
                    })}
                    <div class="modal-actions">
                        <Button
                            variant=ButtonVariant::Secondary
                            attr:type="button"
                            on:click=move |_| vm.close_form()
                        >
                            "Cancel"
                        </Button>
                        <Button attr:type="submit" loading=saving>
                            "Save Farm"
                        </Button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
