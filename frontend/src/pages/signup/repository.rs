use crate::api::{ApiClient, ApiError, SignupRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    Rejected(String),
}

pub async fn signup(api: &ApiClient, request: &SignupRequest) -> Result<SignupOutcome, ApiError> {
    let response = api.signup(request).await?;
    if response.success {
        Ok(SignupOutcome::Created)
    } else {
        Ok(SignupOutcome::Rejected(
            response
                .message
                .unwrap_or_else(|| "Signup failed. Try again.".to_string()),
        ))
    }
}
