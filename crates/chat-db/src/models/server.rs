use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `servers` table
#[derive(Debug, Clone, FromRow)]
pub struct ServerModel {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    pub profile_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
