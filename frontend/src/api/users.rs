use serde_json::Value;

use super::{
    client::{json_body, ApiClient, Method},
    farms::encode_segment,
    types::{LoginRequest, LoginResponse, ProfileUpdate, SignupRequest, SignupResponse},
    ApiError,
};

impl ApiClient {
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.execute("/users/signup", Method::Post, None, Some(json_body(request)?))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.execute("/users/login", Method::Post, None, Some(json_body(request)?))
            .await
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Value, ApiError> {
        let token = self.bearer_token();
        self.execute(
            &format!("/users/{}", encode_segment(user_id)),
            Method::Put,
            token.as_deref(),
            Some(json_body(update)?),
        )
        .await
    }
}
