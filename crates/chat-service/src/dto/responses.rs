//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chat_core::{ChannelType, FileKind, MemberRole, Snowflake};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Profile Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResponse {
    pub id: Snowflake,
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Server Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerResponse {
    pub id: Snowflake,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    /// Owner
    pub profile_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server with everything the sidebar needs
#[derive(Debug, Clone, Serialize)]
pub struct ServerDetailResponse {
    #[serde(flatten)]
    pub server: ServerResponse,
    pub channels: Vec<ChannelResponse>,
    pub members: Vec<MemberResponse>,
}

// ============================================================================
// Channel Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelResponse {
    pub id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub profile_id: Snowflake,
    pub server_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberResponse {
    pub id: Snowflake,
    pub role: MemberRole,
    pub profile_id: Snowflake,
    pub server_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// A message with its author, as history pages and realtime frames carry it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub id: Snowflake,
    pub content: String,
    pub file_url: Option<String>,
    pub file_kind: Option<FileKind>,
    pub member_id: Snowflake,
    pub channel_id: Snowflake,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub member: MemberResponse,
}

/// `{ items, next_cursor }`
#[derive(Debug, Clone, Serialize)]
pub struct MessagePageResponse<T = MessageResponse> {
    pub items: Vec<T>,
    /// Id of the last item when the page is full, otherwise `null`
    pub next_cursor: Option<Snowflake>,
}

// ============================================================================
// Invite Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InviteAcceptResponse {
    pub server: ServerResponse,
    /// False when the caller was already a member
    pub joined: bool,
    /// Where the client should navigate next
    pub redirect: String,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
