//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Server not found: {0}")]
    ServerNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Member not found in server")]
    MemberNotFound,

    #[error("Invite not found: {0}")]
    InviteNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Channel name \"general\" is reserved")]
    ReservedChannelName,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not server owner")]
    NotServerOwner,

    #[error("Not message author")]
    NotMessageAuthor,

    #[error("The general channel cannot be modified")]
    GeneralChannelLocked,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Invite code already exists")]
    InviteCodeExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Server owner cannot leave their own server")]
    CannotLeaveOwnedServer,

    #[error("Cannot kick the server owner")]
    CannotKickOwner,

    #[error("Cannot change your own role")]
    CannotChangeOwnRole,

    #[error("Message has been deleted")]
    MessageDeleted,

    #[error("Messages with attachments cannot be edited")]
    CannotEditAttachment,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound => "UNKNOWN_PROFILE",
            Self::ServerNotFound(_) => "UNKNOWN_SERVER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::InviteNotFound(_) => "UNKNOWN_INVITE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ReservedChannelName => "RESERVED_CHANNEL_NAME",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotServerOwner => "NOT_SERVER_OWNER",
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::GeneralChannelLocked => "GENERAL_CHANNEL_LOCKED",

            // Conflict
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",

            // Business Rules
            Self::CannotLeaveOwnedServer => "CANNOT_LEAVE_OWNED_SERVER",
            Self::CannotKickOwner => "CANNOT_KICK_OWNER",
            Self::CannotChangeOwnRole => "CANNOT_CHANGE_OWN_ROLE",
            Self::MessageDeleted => "MESSAGE_DELETED",
            Self::CannotEditAttachment => "CANNOT_EDIT_ATTACHMENT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound
                | Self::ServerNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::MemberNotFound
                | Self::InviteNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ReservedChannelName | Self::ContentTooLong { .. }
        )
    }

    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_)
                | Self::NotServerOwner
                | Self::NotMessageAuthor
                | Self::GeneralChannelLocked
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::InviteCodeExists)
    }

    /// Rule violations the caller can fix by doing something else
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::CannotLeaveOwnedServer
                | Self::CannotKickOwner
                | Self::CannotChangeOwnRole
                | Self::MessageDeleted
                | Self::CannotEditAttachment
        )
    }
}
