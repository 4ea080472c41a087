//! Channel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chat_service::dto::{
    require_id, ChannelListItemView, ChannelResponse, CreateChannelRequest, ServerScopeQuery,
    UpdateChannelRequest,
};
use chat_service::services::ChannelService;

use crate::extractors::{ApiQuery, CurrentProfile, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/channels?server_id=
pub async fn create_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let server_id = query.server_id()?;
    let channel = ChannelService::new(state.service_context())
        .create_channel(&profile, server_id, request)
        .await?;
    Ok(Created(Json(channel)))
}

/// GET /api/servers/{server_id}/channels
pub async fn list_channels(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    let channels = ChannelService::new(state.service_context())
        .list_channels(&profile, server_id)
        .await?;
    Ok(Json(channels))
}

/// PATCH /api/channels/{channel_id}?server_id=
pub async fn update_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(channel_id): Path<String>,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let server_id = query.server_id()?;
    let channel_id = require_id(Some(&channel_id), "Channel ID")?;
    let channel = ChannelService::new(state.service_context())
        .update_channel(&profile, server_id, channel_id, request)
        .await?;
    Ok(Json(channel))
}

/// DELETE /api/channels/{channel_id}?server_id=
pub async fn delete_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(channel_id): Path<String>,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
) -> ApiResult<Json<ChannelResponse>> {
    let server_id = query.server_id()?;
    let channel_id = require_id(Some(&channel_id), "Channel ID")?;
    let channel = ChannelService::new(state.service_context())
        .delete_channel(&profile, server_id, channel_id)
        .await?;
    Ok(Json(channel))
}

/// GET /api/channels/{channel_id}/view?server_id=
///
/// The server's channel list as the sidebar renders it, with this channel active.
pub async fn channel_view(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(channel_id): Path<String>,
    ApiQuery(query): ApiQuery<ServerScopeQuery>,
) -> ApiResult<Json<Vec<ChannelListItemView>>> {
    let server_id = query.server_id()?;
    let channel_id = require_id(Some(&channel_id), "Channel ID")?;
    let items = ChannelService::new(state.service_context())
        .list_view(&profile, server_id, channel_id)
        .await?;
    Ok(Json(items))
}
