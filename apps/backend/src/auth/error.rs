use thiserror::Error;

/// Failures of origin verification and token handling.
///
/// None of these are fatal; the HTTP boundary turns every variant into an
/// authorization rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("signed payload is outside the freshness window ({age_secs}s old)")]
    ExpiredPayload { age_secs: i64 },
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("malformed signed payload: {0}")]
    MalformedPayload(String),
    #[error("no usable credential presented")]
    MissingCredential,
    #[error("token expired")]
    ExpiredToken,
    #[error("token kind mismatch: expected {expected}, got {actual}")]
    TokenKindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("malformed token")]
    MalformedToken,
    #[error("session exceeded its maximum lifetime")]
    SessionExpired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::ExpiredPayload { .. } => "expired_payload",
            AuthError::SignatureMismatch => "signature_mismatch",
            AuthError::MalformedPayload(_) => "malformed_payload",
            AuthError::MissingCredential => "missing_credential",
            AuthError::ExpiredToken => "expired_token",
            AuthError::TokenKindMismatch { .. } => "token_kind_mismatch",
            AuthError::MalformedToken => "malformed_token",
            AuthError::SessionExpired => "session_expired",
            AuthError::Signing(_) => "signing",
        }
    }
}
