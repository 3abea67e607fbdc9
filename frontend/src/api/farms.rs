use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use super::{
    client::{json_body, ApiClient, Method},
    types::{Farm, FarmPayload},
    ApiError,
};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub(crate) fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub fn farm_path(farm_id: &str) -> String {
    format!("/farms/{}", encode_segment(farm_id))
}

impl ApiClient {
    pub async fn list_farms(&self) -> Result<Vec<Farm>, ApiError> {
        let token = self.bearer_token();
        self.execute("/farms/", Method::Get, token.as_deref(), None)
            .await
    }

    pub async fn create_farm(&self, payload: &FarmPayload) -> Result<Farm, ApiError> {
        let token = self.bearer_token();
        self.execute(
            "/farms",
            Method::Post,
            token.as_deref(),
            Some(json_body(payload)?),
        )
        .await
    }

    pub async fn update_farm(&self, farm_id: &str, payload: &FarmPayload) -> Result<Farm, ApiError> {
        let token = self.bearer_token();
        self.execute(
            &farm_path(farm_id),
            Method::Put,
            token.as_deref(),
            Some(json_body(payload)?),
        )
        .await
    }

    pub async fn delete_farm(&self, farm_id: &str) -> Result<Value, ApiError> {
        let token = self.bearer_token();
        self.execute(&farm_path(farm_id), Method::Delete, token.as_deref(), None)
            .await
    }
}
