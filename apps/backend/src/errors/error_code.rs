//! Error codes for the goals backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Neither an access nor a refresh token was presented
    UnauthorizedMissingCredential,
    /// Telegram payload older than the freshness window
    UnauthorizedExpiredPayload,
    /// HMAC or token signature did not match
    UnauthorizedInvalidSignature,
    /// Telegram payload missing or carrying unparseable fields
    UnauthorizedMalformedPayload,
    /// Token has expired
    UnauthorizedExpiredToken,
    /// Token kind tag does not match the expected kind
    UnauthorizedTokenKindMismatch,
    /// Token could not be decoded
    UnauthorizedMalformedToken,
    /// Refresh chain exceeded the absolute session lifetime
    UnauthorizedSessionExpired,
    /// Token subject has no user record
    ForbiddenUserNotFound,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Missing or empty initData
    InvalidInitData,
    /// Invalid goal ID provided
    InvalidGoalId,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Goal not found (or not owned by the caller)
    GoalNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Telegram id already linked to a user
    UniqueTelegramId,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingCredential => "UNAUTHORIZED_MISSING_CREDENTIAL",
            Self::UnauthorizedExpiredPayload => "UNAUTHORIZED_EXPIRED_PAYLOAD",
            Self::UnauthorizedInvalidSignature => "UNAUTHORIZED_INVALID_SIGNATURE",
            Self::UnauthorizedMalformedPayload => "UNAUTHORIZED_MALFORMED_PAYLOAD",
            Self::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN",
            Self::UnauthorizedTokenKindMismatch => "UNAUTHORIZED_TOKEN_KIND_MISMATCH",
            Self::UnauthorizedMalformedToken => "UNAUTHORIZED_MALFORMED_TOKEN",
            Self::UnauthorizedSessionExpired => "UNAUTHORIZED_SESSION_EXPIRED",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            // Request Validation
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidInitData => "INVALID_INIT_DATA",
            Self::InvalidGoalId => "INVALID_GOAL_ID",

            // Resource Not Found
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GoalNotFound => "GOAL_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::UniqueTelegramId => "UNIQUE_TELEGRAM_ID",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
