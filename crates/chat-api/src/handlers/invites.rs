//! Invite handlers
//!
//! The browser-facing invite page answers with redirects; the API variant
//! returns the same decision as JSON.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use chat_core::Profile;
use chat_service::dto::{InviteAcceptResponse, ServerResponse};
use chat_service::services::InviteService;

use crate::extractors::{CurrentProfile, OptionalProfile};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /invite/{invite_code}
///
/// 303 to sign-in without a profile, to `/` for an unknown code, otherwise to
/// the server after joining it.
pub async fn invite_page(
    State(state): State<AppState>,
    OptionalProfile(profile): OptionalProfile,
    Path(invite_code): Path<String>,
) -> ApiResult<Redirect> {
    redirect(&state, profile.as_ref(), Some(&invite_code)).await
}

/// GET /invite and /invite/
///
/// Same flow with no code: sign-in without a profile, `/` otherwise.
pub async fn invite_page_without_code(
    State(state): State<AppState>,
    OptionalProfile(profile): OptionalProfile,
) -> ApiResult<Redirect> {
    redirect(&state, profile.as_ref(), None).await
}

async fn redirect(
    state: &AppState,
    profile: Option<&Profile>,
    invite_code: Option<&str>,
) -> ApiResult<Redirect> {
    let redirect = InviteService::new(state.service_context())
        .resolve(profile, invite_code)
        .await?;
    Ok(Redirect::to(&redirect.location(state.sign_in_url())))
}

/// POST /api/invites/{invite_code}/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(invite_code): Path<String>,
) -> ApiResult<Json<InviteAcceptResponse>> {
    let acceptance = InviteService::new(state.service_context())
        .accept(&profile, &invite_code)
        .await?;

    Ok(Json(InviteAcceptResponse {
        redirect: acceptance.server.path(),
        server: ServerResponse::from(acceptance.server),
        joined: acceptance.joined,
    }))
}
