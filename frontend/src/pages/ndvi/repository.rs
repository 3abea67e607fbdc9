use chrono::NaiveDate;

use super::utils::sorted_history;
use crate::api::{ApiClient, ApiError, Farm, NdviHistoryEntry, NdviRequest, NdviResult};

#[derive(Clone)]
pub struct NdviRepository {
    client: ApiClient,
}

impl NdviRepository {
    pub fn new_with_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn farms(&self) -> Result<Vec<Farm>, ApiError> {
        self.client.list_farms().await
    }

    pub async fn ndvi_for(&self, farm_id: &str, date: NaiveDate) -> Result<NdviResult, ApiError> {
        let request = NdviRequest {
            farm_id: farm_id.to_string(),
            date,
        };
        self.client.farm_ndvi(&request).await
    }

    pub async fn history(&self, farm_id: &str) -> Result<Vec<NdviHistoryEntry>, ApiError> {
        self.client.ndvi_history(farm_id).await.map(sorted_history)
    }
}
