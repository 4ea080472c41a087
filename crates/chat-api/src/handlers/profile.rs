//! Profile handlers

use axum::{extract::State, Json};
use chat_service::dto::ProfileResponse;
use chat_service::services::ProfileService;

use crate::extractors::{CurrentProfile, Identity};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(CurrentProfile(profile): CurrentProfile) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(profile))
}

/// POST /api/profile
///
/// First call after sign-in creates the profile from the token claims.
pub async fn initial_profile(
    State(state): State<AppState>,
    Identity(claims): Identity,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::new(state.service_context()).initial(&claims).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
