use chrono::NaiveDate;
use leptos::*;

use super::{
    repository::NdviRepository,
    utils::{parse_selected_date, to_lat_lng, DATE_FORMAT},
};
use crate::api::{use_api_client, ApiError, Farm, NdviHistoryEntry, NdviResult};

/// An NDVI response tagged with the selection it was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct NdviFetch {
    pub farm_id: String,
    pub date: NaiveDate,
    pub result: Result<NdviResult, ApiError>,
}

#[derive(Clone, Copy)]
pub struct NdviViewModel {
    pub farms: RwSignal<Vec<Farm>>,
    pub farms_resource: Resource<(), Result<Vec<Farm>, ApiError>>,
    pub selected_farm: RwSignal<Option<String>>,
    pub selected_date: RwSignal<String>,
    pub result: RwSignal<Option<NdviResult>>,
    pub history_resource: Resource<Option<String>, Result<Vec<NdviHistoryEntry>, ApiError>>,
    pub error: RwSignal<Option<ApiError>>,
    pub date_error: RwSignal<Option<String>>,
    pub fetch_action: Action<(String, NaiveDate), NdviFetch>,
}

impl NdviViewModel {
    pub fn new() -> Self {
        let repo = NdviRepository::new_with_client(use_api_client());

        let repo_for_farms = repo.clone();
        let farms_resource = create_local_resource(
            || (),
            move |_| {
                let repo = repo_for_farms.clone();
                async move { repo.farms().await }
            },
        );

        let selected_farm = create_rw_signal(None::<String>);
        let repo_for_history = repo.clone();
        let history_resource = create_local_resource(
            move || selected_farm.get(),
            move |farm_id| {
                let repo = repo_for_history.clone();
                async move {
                    match farm_id {
                        Some(id) => repo.history(&id).await,
                        None => Ok(Vec::new()),
                    }
                }
            },
        );

        let fetch_action = create_action(move |(farm_id, date): &(String, NaiveDate)| {
            let repo = repo.clone();
            let farm_id = farm_id.clone();
            let date = *date;
            async move {
                let result = repo.ndvi_for(&farm_id, date).await;
                NdviFetch {
                    farm_id,
                    date,
                    result,
                }
            }
        });

        let vm = Self {
            farms: create_rw_signal(Vec::new()),
            farms_resource,
            selected_farm,
            selected_date: create_rw_signal(String::new()),
            result: create_rw_signal(None),
            history_resource,
            error: create_rw_signal(None),
            date_error: create_rw_signal(None),
            fetch_action,
        };

        create_effect(move |_| match farms_resource.get() {
            Some(Ok(list)) => vm.farms.set(list),
            Some(Err(err)) => {
                log::warn!("Failed to fetch farms: {}", err);
                vm.error.set(Some(err));
            }
            None => {}
        });

        create_effect(move |_| {
            if let Some(fetch) = fetch_action.value().get() {
                vm.apply_result(fetch);
            }
        });

        vm
    }

    /// Switching farms clears the chosen date and any shown result.
    pub fn select_farm(&self, raw: String) {
        let farm_id = Some(raw).filter(|id| !id.is_empty());
        self.selected_farm.set(farm_id);
        self.selected_date.set(String::new());
        self.result.set(None);
        self.date_error.set(None);
    }

    pub fn select_date(&self, raw: String, today: NaiveDate) {
        self.result.set(None);
        self.error.set(None);
        self.selected_date.set(raw.clone());
        let Some(farm_id) = self.selected_farm.get_untracked() else {
            return;
        };
        match parse_selected_date(&raw, today) {
            Ok(date) => {
                self.date_error.set(None);
                self.fetch_action.dispatch((farm_id, date));
            }
            Err(msg) => self.date_error.set(Some(msg)),
        }
    }

    /// Responses may settle out of order; one that no longer matches the
    /// selected farm and date is dropped.
    pub fn apply_result(&self, fetch: NdviFetch) {
        let current_farm = self.selected_farm.get_untracked();
        let current_date = self.selected_date.get_untracked();
        if current_farm.as_deref() != Some(fetch.farm_id.as_str())
            || current_date.trim() != fetch.date.format(DATE_FORMAT).to_string()
        {
            log::debug!(
                "Discarding NDVI for {} on {}; selection changed",
                fetch.farm_id,
                fetch.date
            );
            return;
        }
        match fetch.result {
            Ok(ndvi) => self.result.set(Some(ndvi)),
            Err(err) => {
                log::warn!("Failed to fetch NDVI: {}", err);
                self.error.set(Some(err));
            }
        }
    }

    pub fn selected_farm_obj(&self) -> Option<Farm> {
        let selected = self.selected_farm.get()?;
        self.farms.with(|farms| farms.iter().find(|farm| farm.id == selected).cloned())
    }

    /// Selected farm outline as `[lat, lng]` pairs.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        self.selected_farm_obj()
            .map(|farm| to_lat_lng(farm.boundaries.points()))
            .unwrap_or_default()
    }
}
