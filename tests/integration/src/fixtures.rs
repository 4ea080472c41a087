//! Request bodies and response shapes used by the integration tests

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Short random suffix so repeated runs never collide
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateServerBody {
    pub name: String,
    pub image_url: String,
}

impl CreateServerBody {
    pub fn unique() -> Self {
        Self {
            name: format!("Server {}", unique_suffix()),
            image_url: "/uploads/icon.png".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChannelBody {
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
}

impl ChannelBody {
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            channel_type: "TEXT".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl MessageBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_url: None,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub profile_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub server_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Member {
    pub id: String,
    pub role: String,
    pub profile_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerDetail {
    #[serde(flatten)]
    pub server: Server,
    pub channels: Vec<Channel>,
    pub members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub file_url: Option<String>,
    pub deleted: bool,
    pub channel_id: String,
    pub member_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InviteAccept {
    pub server: Server,
    pub joined: bool,
    pub redirect: String,
}

#[derive(Debug, Deserialize)]
pub struct Uploaded {
    pub url: String,
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
