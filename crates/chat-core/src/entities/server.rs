//! Server entity - a community with channels and members

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: Snowflake,
    pub name: String,
    pub image_url: String,
    /// Unique code used by invite links
    pub invite_code: String,
    /// Owning profile
    pub profile_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Create a server with a freshly generated invite code
    pub fn new(
        id: Snowflake,
        name: impl Into<String>,
        image_url: impl Into<String>,
        profile_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
            invite_code: generate_invite_code(),
            profile_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, profile_id: Snowflake) -> bool {
        self.profile_id == profile_id
    }

    pub fn rename(&mut self, name: impl Into<String>, image_url: impl Into<String>) {
        self.name = name.into();
        self.image_url = image_url.into();
        self.updated_at = Utc::now();
    }

    pub fn regenerate_invite_code(&mut self) {
        self.invite_code = generate_invite_code();
        self.updated_at = Utc::now();
    }

    /// Path the web client uses for this server
    pub fn path(&self) -> String {
        format!("/servers/{}", self.id)
    }
}

/// Random UUID v4 invite code
pub fn generate_invite_code() -> String {
    uuid::Uuid::new_v4().to_string()
}
