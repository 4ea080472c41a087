//! Server handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chat_service::dto::{
    require_id, CreateServerRequest, ServerDetailResponse, ServerResponse, UpdateServerRequest,
};
use chat_service::services::ServerService;
use tracing::error;

use crate::extractors::{CurrentProfile, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// POST /api/servers
pub async fn create_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ValidatedJson(request): ValidatedJson<CreateServerRequest>,
) -> ApiResult<Created<Json<ServerResponse>>> {
    let server = ServerService::new(state.service_context())
        .create_server(&profile, request)
        .await?;
    Ok(Created(Json(server)))
}

/// GET /api/servers
pub async fn list_servers(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
) -> ApiResult<Json<Vec<ServerResponse>>> {
    let servers = ServerService::new(state.service_context())
        .list_servers(&profile)
        .await?;
    Ok(Json(servers))
}

/// GET /api/servers/{server_id}
pub async fn get_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<ServerDetailResponse>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let detail = ServerService::new(state.service_context())
        .get_server(&profile, server_id)
        .await?;
    Ok(Json(detail))
}

/// PATCH /api/servers/{server_id}
pub async fn update_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateServerRequest>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let server = ServerService::new(state.service_context())
        .update_server(&profile, server_id, request)
        .await?;
    Ok(Json(server))
}

/// DELETE /api/servers/{server_id}
pub async fn delete_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let server = ServerService::new(state.service_context())
        .delete_server(&profile, server_id)
        .await?;
    Ok(Json(server))
}

/// PATCH /api/servers/{server_id}/invite-code
pub async fn regenerate_invite_code(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let server = ServerService::new(state.service_context())
        .regenerate_invite_code(&profile, server_id)
        .await?;
    Ok(Json(server))
}

/// PATCH /api/servers/{server_id}/leave
pub async fn leave_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    ServerService::new(state.service_context())
        .leave_server(&profile, server_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
        .inspect_err(|e| {
            if e.is_server_error() {
                error!(error = ?e, "[LEAVE SERVER]");
            }
        })
}
