use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `profiles` table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
