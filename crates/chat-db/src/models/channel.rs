use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `channels` table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub name: String,
    /// `TEXT`, `AUDIO` or `VIDEO`
    pub channel_type: String,
    pub profile_id: i64,
    pub server_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
