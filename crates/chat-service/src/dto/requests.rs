//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`. Query strings are kept as
//! raw optional strings so a missing parameter becomes a 400 naming it
//! rather than a generic rejection.

use chat_core::{ChannelType, MemberRole, Snowflake};
use serde::Deserialize;
use validator::Validate;

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Server Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(min = 1, max = 100, message = "Server name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Server image is required"))]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateServerRequest {
    #[validate(length(min = 1, max = 100, message = "Server name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Server image is required"))]
    pub image_url: String,
}

// ============================================================================
// Channel Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name is required"))]
    pub name: String,

    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name is required"))]
    pub name: String,

    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
}

// ============================================================================
// Member Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: MemberRole,
}

// ============================================================================
// Message Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, message = "Content missing"))]
    pub content: String,

    /// URL returned by the `messageFile` upload route
    #[serde(default)]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, message = "Content missing"))]
    pub content: String,
}

// ============================================================================
// Query Strings
// ============================================================================

/// Parse a required id parameter; absent or blank is `"{label} missing"`
pub fn require_id(raw: Option<&str>, label: &str) -> ServiceResult<Snowflake> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::missing(label))?;
    Snowflake::parse(raw).map_err(|_| ServiceError::validation(format!("Invalid {label}")))
}

/// Parse an optional id parameter; blank counts as absent
pub fn optional_id(raw: Option<&str>, label: &str) -> ServiceResult<Option<Snowflake>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Snowflake::parse(s)
            .map(Some)
            .map_err(|_| ServiceError::validation(format!("Invalid {label}"))),
    }
}

/// `?server_id=` on member and channel mutations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerScopeQuery {
    pub server_id: Option<String>,
}

impl ServerScopeQuery {
    pub fn server_id(&self) -> ServiceResult<Snowflake> {
        require_id(self.server_id.as_deref(), "Server ID")
    }
}

/// `?server_id=&channel_id=` on socket message mutations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageScopeQuery {
    pub server_id: Option<String>,
    pub channel_id: Option<String>,
}

impl MessageScopeQuery {
    pub fn server_id(&self) -> ServiceResult<Snowflake> {
        require_id(self.server_id.as_deref(), "Server ID")
    }

    pub fn channel_id(&self) -> ServiceResult<Snowflake> {
        require_id(self.channel_id.as_deref(), "Channel ID")
    }
}

/// `?cursor=&channel_id=` on channel history
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageHistoryQuery {
    pub cursor: Option<String>,
    pub channel_id: Option<String>,
}

impl MessageHistoryQuery {
    pub fn channel_id(&self) -> ServiceResult<Snowflake> {
        require_id(self.channel_id.as_deref(), "Channel ID")
    }

    pub fn cursor(&self) -> ServiceResult<Option<Snowflake>> {
        optional_id(self.cursor.as_deref(), "cursor")
    }
}
