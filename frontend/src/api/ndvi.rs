use super::{
    client::{json_body, ApiClient, Method},
    farms::encode_segment,
    types::{NdviHistoryEntry, NdviRequest, NdviResult},
    ApiError,
};

impl ApiClient {
    pub async fn farm_ndvi(&self, request: &NdviRequest) -> Result<NdviResult, ApiError> {
        let token = self.bearer_token();
        self.execute(
            "/farms/ndvi",
            Method::Post,
            token.as_deref(),
            Some(json_body(request)?),
        )
        .await
    }

    pub async fn ndvi_history(&self, farm_id: &str) -> Result<Vec<NdviHistoryEntry>, ApiError> {
        let token = self.bearer_token();
        self.execute(
            &format!("/farms/ndvi/history/{}", encode_segment(farm_id)),
            Method::Get,
            token.as_deref(),
            None,
        )
        .await
    }
}
