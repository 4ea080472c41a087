//! Member entity - a profile's membership in a server

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Profile;
use crate::error::DomainError;
use crate::value_objects::{Permissions, Snowflake};

/// Fixed member roles, most privileged first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Admin,
    Moderator,
    #[default]
    Guest,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Guest => "GUEST",
        }
    }

    pub fn permissions(&self) -> Permissions {
        match self {
            Self::Admin => Permissions::ADMIN,
            Self::Moderator => Permissions::MODERATOR,
            Self::Guest => Permissions::GUEST,
        }
    }

    /// Sort key for member lists (admins first)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Moderator => 1,
            Self::Guest => 2,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MODERATOR" => Ok(Self::Moderator),
            "GUEST" => Ok(Self::Guest),
            other => Err(DomainError::ValidationError(format!("unknown member role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Snowflake,
    pub role: MemberRole,
    pub profile_id: Snowflake,
    pub server_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: Snowflake, profile_id: Snowflake, server_id: Snowflake, role: MemberRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            role,
            profile_id,
            server_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn can(&self, permission: Permissions) -> bool {
        self.role.permissions().contains(permission)
    }

    pub fn set_role(&mut self, role: MemberRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

/// Member joined with its profile, as lists and message authors carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithProfile {
    pub member: Member,
    pub profile: Profile,
}
