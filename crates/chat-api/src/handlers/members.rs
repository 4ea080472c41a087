//! Member handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chat_service::dto::{
    require_id, MemberResponse, ServerDetailResponse, ServerScopeQuery, UpdateMemberRoleRequest,
};
use chat_service::services::MemberService;

use crate::extractors::{ApiQuery, CurrentProfile};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/servers/{server_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let members = MemberService::new(state.service_context())
        .list_members(&profile, server_id)
        .await?;
    Ok(Json(members))
}

/// PATCH /api/members/{member_id}?server_id=
pub async fn update_member_role(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(member_id): Path<String>,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
    body: Result<Json<UpdateMemberRoleRequest>, axum::extract::rejection::JsonRejection>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = query.server_id()?;
    let member_id = require_id(Some(&member_id), "Member ID")?;
    let Json(request) = body.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    let detail = MemberService::new(state.service_context())
        .change_role(&profile, server_id, member_id, request.role)
        .await?;
    Ok(Json(detail))
}

/// DELETE /api/members/{member_id}?server_id=
pub async fn kick_member(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(member_id): Path<String>,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = query.server_id()?;
    let member_id = require_id(Some(&member_id), "Member ID")?;

    let detail = MemberService::new(state.service_context())
        .kick_member(&profile, server_id, member_id)
        .await?;
    Ok(Json(detail))
}
