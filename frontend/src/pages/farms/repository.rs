use serde_json::Value;

use crate::api::{ApiClient, ApiError, Farm, FarmPayload};

#[derive(Clone)]
pub struct FarmsRepository {
    client: ApiClient,
}

impl FarmsRepository {
    pub fn new_with_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Farm>, ApiError> {
        self.client.list_farms().await
    }

    /// Creates the farm when `farm_id` is `None`, updates it otherwise.
    pub async fn save(&self, farm_id: Option<&str>, payload: &FarmPayload) -> Result<Farm, ApiError> {
        match farm_id {
            Some(id) => self.client.update_farm(id, payload).await,
            None => self.client.create_farm(payload).await,
        }
    }

    pub async fn delete(&self, farm_id: &str) -> Result<Value, ApiError> {
        self.client.delete_farm(farm_id).await
    }
}
