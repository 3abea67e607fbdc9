use leptos::*;

use super::{
    repository::FarmsRepository,
    utils::{remove_farm, upsert_farm, FarmDraft},
};
use crate::api::{use_api_client, ApiError, Farm, FarmPayload};

#[derive(Debug, Clone, PartialEq)]
pub struct SaveFarmInput {
    pub farm_id: Option<String>,
    pub payload: FarmPayload,
}

#[derive(Clone, Copy)]
pub struct FarmsViewModel {
    pub farms: RwSignal<Vec<Farm>>,
    pub farms_resource: Resource<u32, Result<Vec<Farm>, ApiError>>,
    pub reload: RwSignal<u32>,
    pub form_open: RwSignal<bool>,
    pub editing_id: RwSignal<Option<String>>,
    pub draft: RwSignal<FarmDraft>,
    pub form_error: RwSignal<Option<String>>,
    pub pending_delete: RwSignal<Option<Farm>>,
    pub error: RwSignal<Option<ApiError>>,
    pub save_action: Action<SaveFarmInput, Result<Farm, ApiError>>,
    pub delete_action: Action<String, Result<String, ApiError>>,
}

impl FarmsViewModel {
    pub fn new() -> Self {
        let repo = FarmsRepository::new_with_client(use_api_client());

        let reload = create_rw_signal(0u32);
        let repo_for_list = repo.clone();
        let farms_resource = create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = repo_for_list.clone();
                async move { repo.list().await }
            },
        );

        let repo_for_save = repo.clone();
        let save_action = create_action(move |input: &SaveFarmInput| {
            let repo = repo_for_save.clone();
            let input = input.clone();
            async move { repo.save(input.farm_id.as_deref(), &input.payload).await }
        });

        let delete_action = create_action(move |farm_id: &String| {
            let repo = repo.clone();
            let farm_id = farm_id.clone();
            async move { repo.delete(&farm_id).await.map(|_| farm_id) }
        });

        let vm = Self {
            farms: create_rw_signal(Vec::new()),
            farms_resource,
            reload,
            form_open: create_rw_signal(false),
            editing_id: create_rw_signal(None),
            draft: create_rw_signal(FarmDraft::default()),
            form_error: create_rw_signal(None),
            pending_delete: create_rw_signal(None),
            error: create_rw_signal(None),
            save_action,
            delete_action,
        };

        create_effect(move |_| match farms_resource.get() {
            Some(Ok(list)) => {
                vm.farms.set(list);
                vm.error.set(None);
            }
            Some(Err(err)) => vm.error.set(Some(err)),
            None => {}
        });

        create_effect(move |_| {
            if let Some(result) = save_action.value().get() {
                vm.apply_saved(result);
            }
        });

        create_effect(move |_| {
            if let Some(result) = delete_action.value().get() {
                vm.apply_deleted(result);
            }
        });

        vm
    }

    pub fn open_create(&self) {
        self.editing_id.set(None);
        self.draft.set(FarmDraft::default());
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn open_edit(&self, farm: &Farm) {
        self.editing_id.set(Some(farm.id.clone()));
        self.draft.set(FarmDraft::from_farm(farm));
        self.form_error.set(None);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.form_error.set(None);
    }

    /// Validates the draft and dispatches a create or update.
    pub fn submit(&self, user_id: Option<String>) {
        match self.draft.get_untracked().into_payload(user_id) {
            Ok(payload) => {
                self.form_error.set(None);
                self.save_action.dispatch(SaveFarmInput {
                    farm_id: self.editing_id.get_untracked(),
                    payload,
                });
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(farm) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(farm.id);
        }
    }

    pub fn apply_saved(&self, result: Result<Farm, ApiError>) {
        match result {
            Ok(farm) => {
                self.farms.update(|farms| upsert_farm(farms, farm));
                self.close_form();
                self.draft.set(FarmDraft::default());
                self.editing_id.set(None);
            }
            Err(err) => self.form_error.set(Some(err.to_string())),
        }
    }

    pub fn apply_deleted(&self, result: Result<String, ApiError>) {
        match result {
            Ok(farm_id) => self.farms.update(|farms| remove_farm(farms, &farm_id)),
            Err(err) => self.error.set(Some(err)),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Boundary;
    use crate::test_support::helpers::{grower_session, provide_session};
    use crate::test_support::ssr::with_runtime;

    fn farm(id: &str, name: &str) -> Farm {
        Farm {
            id: id.into(),
            name: name.into(),
            location: "Kisumu".into(),
            boundaries: Boundary(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
            description: None,
            user_id: Some("u1".into()),
        }
    }

    #[test]
    fn edit_then_save_replaces_farm_and_closes_form() {
        with_runtime(|| {
            provide_session(Some(grower_session()));
            let vm = FarmsViewModel::new();
            vm.farms.set(vec![farm("f1", "North Field")]);

            vm.open_edit(&farm("f1", "North Field"));
            assert!(vm.form_open.get_untracked());
            assert_eq!(vm.editing_id.get_untracked().as_deref(), Some("f1"));

            vm.apply_saved(Ok(farm("f1", "North Field West")));
            assert!(!vm.form_open.get_untracked());
            let farms = vm.farms.get_untracked();
            assert_eq!(farms.len(), 1);
            assert_eq!(farms[0].name, "North Field West");
        });
    }

    #[test]
    fn invalid_draft_sets_form_error_without_dispatch() {
        with_runtime(|| {
            provide_session(Some(grower_session()));
            let vm = FarmsViewModel::new();
            vm.open_create();
            vm.submit(Some("u1".into()));
            assert!(vm.form_error.get_untracked().is_some());
            assert!(!vm.save_action.pending().get_untracked());
        });
    }

    #[test]
    fn failed_save_keeps_form_open() {
        with_runtime(|| {
            provide_session(Some(grower_session()));
            let vm = FarmsViewModel::new();
            vm.open_create();
            vm.apply_saved(Err(ApiError::request_failed(Some(500), "boom")));
            assert!(vm.form_open.get_untracked());
            assert!(vm.form_error.get_untracked().unwrap().contains("boom"));
        });
    }

    #[test]
    fn delete_result_removes_farm() {
        with_runtime(|| {
            provide_session(Some(grower_session()));
            let vm = FarmsViewModel::new();
            vm.farms.set(vec![farm("f1", "North Field"), farm("f2", "River Plot")]);
            vm.apply_deleted(Ok("f1".into()));
            assert_eq!(vm.farms.get_untracked().len(), 1);

            vm.apply_deleted(Err(ApiError::Unauthorized));
            assert_eq!(vm.error.get_untracked(), Some(ApiError::Unauthorized));
        });
    }
}
