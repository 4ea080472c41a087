//! Message handlers
//!
//! Channel history and the socket-backed mutations the chat item calls.

use axum::{
    extract::{Path, State},
    Json,
};
use chat_service::dto::{
    require_id, ChatItemView, CreateMessageRequest, MessageHistoryQuery, MessagePageResponse,
    MessageResponse, MessageScopeQuery, UpdateMessageRequest,
};
use chat_service::services::MessageService;
use tracing::error;

use crate::extractors::{ApiQuery, CurrentProfile, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

fn log_route_error(e: &ApiError) {
    if e.is_server_error() {
        error!(error = ?e, "[MESSAGE ROUTE ERROR]");
    }
}

/// GET /api/messages?cursor=&channel_id=
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ApiQuery(query): ApiQuery<MessageHistoryQuery>,
) -> ApiResult<Json<MessagePageResponse>> {
    let channel_id = query.channel_id()?;
    let cursor = query.cursor()?;

    MessageService::new(state.service_context())
        .list_messages(&profile, channel_id, cursor)
        .await
        .map(Json)
        .map_err(ApiError::from)
        .inspect_err(log_route_error)
}

/// GET /api/messages/view?cursor=&channel_id=
pub async fn messages_view(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ApiQuery(query): ApiQuery<MessageHistoryQuery>,
) -> ApiResult<Json<MessagePageResponse<ChatItemView>>> {
    let channel_id = query.channel_id()?;
    let cursor = query.cursor()?;

    MessageService::new(state.service_context())
        .list_view(&profile, channel_id, cursor)
        .await
        .map(Json)
        .map_err(ApiError::from)
        .inspect_err(log_route_error)
}

/// POST /api/socket/messages?server_id=&channel_id=
pub async fn create_message(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    ApiQuery(query): ApiQuery<MessageScopeQuery>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let server_id = query.server_id()?;
    let channel_id = query.channel_id()?;

    let message = MessageService::new(state.service_context())
        .create_message(&profile, server_id, channel_id, request)
        .await?;
    Ok(Created(Json(message)))
}

/// PATCH /api/socket/messages/{message_id}?server_id=&channel_id=
pub async fn edit_message(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(message_id): Path<String>,
    ApiQuery(query): ApiQuery<MessageScopeQuery>,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let server_id = query.server_id()?;
    let channel_id = query.channel_id()?;
    let message_id = require_id(Some(&message_id), "Message ID")?;

    let message = MessageService::new(state.service_context())
        .edit_message(&profile, server_id, channel_id, message_id, request)
        .await?;
    Ok(Json(message))
}

/// DELETE /api/socket/messages/{message_id}?server_id=&channel_id=
pub async fn delete_message(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(message_id): Path<String>,
    ApiQuery(query): ApiQuery<MessageScopeQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let server_id = query.server_id()?;
    let channel_id = query.channel_id()?;
    let message_id = require_id(Some(&message_id), "Message ID")?;

    let message = MessageService::new(state.service_context())
        .delete_message(&profile, server_id, channel_id, message_id)
        .await?;
    Ok(Json(message))
}
