use crate::{
    api::{ApiClient, ApiError, ProfileUpdate},
    state::session::SessionStore,
};

/// Saves the profile for the signed-in user and mirrors it into the session.
pub async fn save_profile(
    api: &ApiClient,
    store: &SessionStore,
    update: &ProfileUpdate,
) -> Result<(), ApiError> {
    let user_id = store.user_id().ok_or(ApiError::SessionExpired)?;
    api.update_user(&user_id, update).await?;
    store
        .update_profile(update)
        .map_err(|_| ApiError::SessionExpired)
}
