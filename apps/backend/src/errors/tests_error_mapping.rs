// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::auth::error::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let app: AppError = DomainError::validation("title must not be empty").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let unique = DomainError::conflict(ConflictKind::UniqueTelegramId, "exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_TELEGRAM_ID");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "no user").into();
    assert_eq!(app.code().as_str(), "USER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::goal_not_found().into();
    assert_eq!(app.code().as_str(), "GOAL_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn every_auth_failure_is_401_except_signing() {
    let cases = [
        (AuthError::ExpiredPayload { age_secs: 4000 }, "UNAUTHORIZED_EXPIRED_PAYLOAD"),
        (AuthError::SignatureMismatch, "UNAUTHORIZED_INVALID_SIGNATURE"),
        (AuthError::MalformedPayload("x".into()), "UNAUTHORIZED_MALFORMED_PAYLOAD"),
        (AuthError::MissingCredential, "UNAUTHORIZED_MISSING_CREDENTIAL"),
        (AuthError::ExpiredToken, "UNAUTHORIZED_EXPIRED_TOKEN"),
        (
            AuthError::TokenKindMismatch {
                expected: "access",
                actual: "refresh",
            },
            "UNAUTHORIZED_TOKEN_KIND_MISMATCH",
        ),
        (AuthError::MalformedToken, "UNAUTHORIZED_MALFORMED_TOKEN"),
        (AuthError::SessionExpired, "UNAUTHORIZED_SESSION_EXPIRED"),
    ];
    for (err, code) in cases {
        let app: AppError = err.into();
        assert_eq!(app.status().as_u16(), 401);
        assert_eq!(app.code().as_str(), code);
    }

    let app: AppError = AuthError::Signing("boom".into()).into();
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn forbidden_user_not_found_is_403() {
    let app = AppError::forbidden_user_not_found();
    assert_eq!(app.status().as_u16(), 403);
    assert_eq!(app.code(), ErrorCode::ForbiddenUserNotFound);
}

#[test]
fn constructor_helpers() {
    assert!(matches!(
        DomainError::validation("invalid input"),
        DomainError::Validation(_)
    ));
    assert!(matches!(
        DomainError::conflict(ConflictKind::UniqueTelegramId, "dup"),
        DomainError::Conflict(ConflictKind::UniqueTelegramId, _)
    ));
    assert!(matches!(
        DomainError::not_found(NotFoundKind::User, "user missing"),
        DomainError::NotFound(NotFoundKind::User, _)
    ));
    assert!(matches!(
        DomainError::infra(InfraErrorKind::Timeout, "timeout"),
        DomainError::Infra(InfraErrorKind::Timeout, _)
    ));
}
