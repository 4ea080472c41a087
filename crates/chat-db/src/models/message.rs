//! Message rows, alone and joined with their author

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `messages` table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub content: String,
    pub file_url: Option<String>,
    pub member_id: i64,
    pub channel_id: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `messages JOIN members JOIN profiles`
///
/// Member columns are prefixed `member_`, profile columns `profile_`.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithMemberModel {
    pub id: i64,
    pub content: String,
    pub file_url: Option<String>,
    pub member_id: i64,
    pub channel_id: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub member_role: String,
    pub member_profile_id: i64,
    pub member_server_id: i64,
    pub member_created_at: DateTime<Utc>,
    pub member_updated_at: DateTime<Utc>,
    pub profile_user_id: String,
    pub profile_name: String,
    pub profile_image_url: String,
    pub profile_email: String,
    pub profile_created_at: DateTime<Utc>,
    pub profile_updated_at: DateTime<Utc>,
}
