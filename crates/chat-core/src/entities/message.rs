//! Message entity - a post in a channel

use chrono::{DateTime, Utc};

use crate::entities::MemberWithProfile;
use crate::value_objects::{FileKind, Snowflake};

/// Content left behind by a soft delete
pub const DELETED_MESSAGE_CONTENT: &str = "This message has been deleted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub content: String,
    pub file_url: Option<String>,
    pub member_id: Snowflake,
    pub channel_id: Snowflake,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: Snowflake,
        content: impl Into<String>,
        file_url: Option<String>,
        member_id: Snowflake,
        channel_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            content: content.into(),
            file_url: file_url.filter(|u| !u.is_empty()),
            member_id,
            channel_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// True once the message has been edited or deleted
    #[inline]
    pub fn is_updated(&self) -> bool {
        self.updated_at != self.created_at
    }

    #[inline]
    pub fn file_kind(&self) -> Option<FileKind> {
        FileKind::from_url(self.file_url.as_deref())
    }

    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Soft delete: the row stays so history keeps its shape
    pub fn soft_delete(&mut self) {
        self.content = DELETED_MESSAGE_CONTENT.to_string();
        self.file_url = None;
        self.deleted = true;
        self.updated_at = Utc::now();
    }
}

/// Message joined with its author, as listings return it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithMember {
    pub message: Message,
    pub author: MemberWithProfile,
}
