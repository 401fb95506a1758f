use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use super::session_tokens::SessionTokens;
use crate::auth::jwt::TokenPair;
use crate::auth::resolver::resolve_current_user;
use crate::db::require_db;
use crate::error::AppError;
use crate::logging::security;
use crate::services::users;
use crate::state::app_state::AppState;
use crate::utils::clock::unix_now;

/// Authenticated caller, resolved from session cookies (or a bearer header)
/// and mapped to the internal user row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Pair minted while resolving the caller; `SessionCookies` writes it out.
#[derive(Debug, Clone)]
pub struct RotatedSession(pub TokenPair);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let tokens = SessionTokens::from_request_parts(&req);
            let session = resolve_current_user(
                &app_state.tokens,
                tokens.access.as_deref(),
                tokens.refresh.as_deref(),
                unix_now(),
            )
            .map_err(|err| {
                security::auth_failed("resolve", &err);
                AppError::from(err)
            })?;

            if let Some(pair) = session.rotated.clone() {
                security::session_rotated(session.telegram_id());
                req.extensions_mut().insert(RotatedSession(pair));
            }

            let db = require_db(app_state)?;
            let user = users::user_for_telegram_id(db, session.telegram_id()).await?;

            // Display fields come from the row; the token copy may be stale.
            Ok(CurrentUser {
                id: user.id,
                telegram_id: session.telegram_id(),
                username: user.username,
                first_name: user.first_name,
                last_name: user.last_name,
            })
        })
    }
}
