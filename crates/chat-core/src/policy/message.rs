use crate::entities::{Member, MemberRole, Message};
use crate::error::DomainError;

/// What the viewing member may do with one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePolicy {
    pub is_admin: bool,
    pub is_moderator: bool,
    /// The viewer wrote the message
    pub is_owner: bool,
}

impl MessagePolicy {
    pub fn new(viewer: &Member, message: &Message) -> Self {
        Self {
            is_admin: viewer.role == MemberRole::Admin,
            is_moderator: viewer.role == MemberRole::Moderator,
            is_owner: viewer.id == message.member_id,
        }
    }

    pub fn can_delete(&self, message: &Message) -> bool {
        !message.deleted && (self.is_admin || self.is_moderator || self.is_owner)
    }

    /// Only the author edits, and only plain text messages
    pub fn can_edit(&self, message: &Message) -> bool {
        !message.deleted && self.is_owner && message.file_url.is_none()
    }

    pub fn ensure_can_delete(&self, message: &Message) -> Result<(), DomainError> {
        if message.deleted {
            return Err(DomainError::MessageDeleted);
        }
        if self.can_delete(message) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission("MANAGE_MESSAGES".to_string()))
        }
    }

    pub fn ensure_can_edit(&self, message: &Message) -> Result<(), DomainError> {
        if message.deleted {
            return Err(DomainError::MessageDeleted);
        }
        if !self.is_owner {
            return Err(DomainError::NotMessageAuthor);
        }
        if message.file_url.is_some() {
            return Err(DomainError::CannotEditAttachment);
        }
        Ok(())
    }
}
