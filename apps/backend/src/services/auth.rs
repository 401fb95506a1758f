//! Sign-in and refresh flows glued from the origin verifier, the user store
//! and the token issuer.

use crate::auth::claims::TokenKind;
use crate::auth::error::AuthError;
use crate::auth::jwt::TokenPair;
use crate::auth::origin::{OriginFlow, SignedPayload, TelegramUser};
use crate::db::require_db;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::users::User;
use crate::services::users;
use crate::state::app_state::AppState;

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub user: User,
    pub created: bool,
    pub tokens: TokenPair,
}

fn rejected(stage: &'static str) -> impl Fn(AuthError) -> AppError {
    move |err| {
        security::auth_failed(stage, &err);
        AppError::from(err)
    }
}

/// Verify a Telegram payload, upsert its user and open a new session.
pub async fn sign_in(
    state: &AppState,
    flow: OriginFlow,
    payload: &SignedPayload,
    now: i64,
) -> Result<SignIn, AppError> {
    let verified = state
        .verifier
        .verify(flow, payload, now)
        .map_err(rejected(flow.as_str()))?;

    let subject: TelegramUser = verified
        .user
        .ok_or_else(|| AuthError::MalformedPayload("payload carries no user".into()))
        .map_err(rejected(flow.as_str()))?;

    let db = require_db(state)?;
    let (user, created) = users::upsert_telegram_user(db, &subject).await?;
    let tokens = state.tokens.issue_pair(&subject, now)?;

    security::signed_in(flow.as_str(), subject.id, created);
    Ok(SignIn {
        user,
        created,
        tokens,
    })
}

/// Exchange a refresh token for a new pair.
pub fn refresh(
    state: &AppState,
    refresh_token: Option<&str>,
    now: i64,
) -> Result<TokenPair, AppError> {
    let token = refresh_token
        .ok_or(AuthError::MissingCredential)
        .map_err(rejected("refresh"))?;
    let pair = state.tokens.rotate(token, now).map_err(rejected("refresh"))?;

    if let Ok(claims) = state.tokens.verify(TokenKind::Access, &pair.access_token, now) {
        security::session_rotated(claims.sub);
    }
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use backend_test_support::telegram::{
        mini_app_secret, sign_fields, signed_init_data, signed_mini_app_fields,
    };

    use super::*;
    use crate::config::db::DbKind;
    use crate::errors::ErrorCode;
    use crate::infra::state::build_state;
    use crate::state::security_config::SecurityConfig;

    const NOW: i64 = 1_700_000_000;

    #[tokio::test]
    async fn sign_in_creates_then_updates_user() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory)
            .build()
            .await
            .unwrap();

        let first = SignedPayload::from_query(&signed_init_data(
            "T",
            r#"{"id":42,"username":"alice"}"#,
            NOW,
        ));
        let signed = sign_in(&state, OriginFlow::MiniApp, &first, NOW).await.unwrap();
        assert!(signed.created);
        assert_eq!(signed.user.telegram_id, "42");
        assert_eq!(signed.user.username.as_deref(), Some("alice"));

        let second = SignedPayload::from_query(&signed_init_data(
            "T",
            r#"{"id":42,"username":"alice2","first_name":"Al"}"#,
            NOW + 5,
        ));
        let again = sign_in(&state, OriginFlow::MiniApp, &second, NOW + 5)
            .await
            .unwrap();
        assert!(!again.created);
        assert_eq!(again.user.id, signed.user.id);
        assert_eq!(again.user.username.as_deref(), Some("alice2"));
        assert_eq!(again.user.first_name.as_deref(), Some("Al"));
    }

    #[tokio::test]
    async fn payload_without_user_is_rejected() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory)
            .build()
            .await
            .unwrap();
        let mut fields = signed_mini_app_fields("T", "{}", NOW);
        fields.remove("user");
        fields.remove("hash");
        let hash = sign_fields(&mini_app_secret("T"), &fields);
        fields.insert("hash".into(), hash);
        let payload: SignedPayload = fields.into_iter().collect();

        let err = sign_in(&state, OriginFlow::MiniApp, &payload, NOW)
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[test]
    fn refresh_without_cookie_is_missing_credential() {
        let state = AppState::new_without_db(SecurityConfig::for_tests());
        let err = refresh(&state, None, NOW).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedMissingCredential);
    }
}
