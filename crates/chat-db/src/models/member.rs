//! Member rows, alone and joined with their profile

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `members` table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    /// `ADMIN`, `MODERATOR` or `GUEST`
    pub role: String,
    pub profile_id: i64,
    pub server_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `members JOIN profiles`, profile columns prefixed with `profile_`
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithProfileModel {
    pub id: i64,
    pub role: String,
    pub profile_id: i64,
    pub server_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile_user_id: String,
    pub profile_name: String,
    pub profile_image_url: String,
    pub profile_email: String,
    pub profile_created_at: DateTime<Utc>,
    pub profile_updated_at: DateTime<Utc>,
}
