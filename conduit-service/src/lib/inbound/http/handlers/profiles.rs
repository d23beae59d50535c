use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileResponseData;
use crate::domain::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;

/// `GET /api/profiles/:username`
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .user_service
        .get_profile(&username, identity.user_id())
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// `POST /api/profiles/:username/follow`
pub async fn follow(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let follower = identity.require_user()?.id;

    state
        .user_service
        .follow(&username, follower)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// `DELETE /api/profiles/:username/follow`
pub async fn unfollow(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let follower = identity.require_user()?.id;

    state
        .user_service
        .unfollow(&username, follower)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
