//! Profile entity - a person known to the identity provider

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Snowflake,
    /// Subject claim issued by the identity provider
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        id: Snowflake,
        user_id: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: user_id.into(),
            name: name.into(),
            image_url: image_url.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
