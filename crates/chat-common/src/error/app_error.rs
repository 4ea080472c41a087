//! Application error types
//!
//! Shared by every layer above the domain; the HTTP layer turns these into
//! JSON error bodies.

use chat_core::DomainError;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    MissingParameter(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::MissingParameter(_) => 400,
            Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => 401,
            Self::InsufficientPermissions => 403,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "UNAUTHORIZED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// A required request parameter was absent, e.g. `"Channel ID missing"`
    #[must_use]
    pub fn missing(what: impl fmt::Display) -> Self {
        Self::MissingParameter(format!("{what} missing"))
    }
}

/// HTTP status for a domain error, shared with the service layer
pub fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() || e.is_business_rule() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Snowflake;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingAuth.status_code(), 401);
        assert_eq!(AppError::missing("Channel ID").status_code(), 400);
        assert_eq!(AppError::InsufficientPermissions.status_code(), 403);
        assert_eq!(AppError::NotFound("server".into()).status_code(), 404);
        assert_eq!(AppError::PayloadTooLarge("4MB".into()).status_code(), 413);
        assert_eq!(AppError::Database("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(AppError::from(DomainError::ServerNotFound(Snowflake::new(1))).status_code(), 404);
        assert_eq!(AppError::from(DomainError::GeneralChannelLocked).status_code(), 403);
        assert_eq!(AppError::from(DomainError::ReservedChannelName).status_code(), 400);
        assert_eq!(AppError::from(DomainError::CannotLeaveOwnedServer).status_code(), 400);
        assert_eq!(AppError::from(DomainError::InviteCodeExists).status_code(), 409);
        assert_eq!(AppError::from(DomainError::DatabaseError("x".into())).status_code(), 500);
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(AppError::missing("Server ID").to_string(), "Server ID missing");
    }

    #[test]
    fn test_server_errors() {
        assert!(!AppError::MissingAuth.is_server_error());
        assert!(AppError::Storage("disk".into()).is_server_error());
    }
}
