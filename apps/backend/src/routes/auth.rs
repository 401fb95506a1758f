use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::claims::TokenKind;
use crate::auth::origin::{OriginFlow, SignedPayload};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, SessionTokens, ValidatedJson};
use crate::http::cookies::{expired_cookie, set_pair};
use crate::services::auth as auth_service;
use crate::state::app_state::AppState;
use crate::utils::clock::unix_now;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(rename = "initData", default)]
    pub init_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn signed_in_response(
    app_state: &AppState,
    signed: auth_service::SignIn,
) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    set_pair(&mut builder, &app_state.tokens, &signed.tokens);
    builder.json(SignInResponse {
        success: true,
        user_id: signed.user.id,
    })
}

/// Mini App sign-in with the raw `initData` query string.
async fn signin(
    body: ValidatedJson<SignInRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let init_data = body
        .into_inner()
        .init_data
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidInitData, "initData is required")
        })?;

    let payload = SignedPayload::from_query(&init_data);
    let signed = auth_service::sign_in(&app_state, OriginFlow::MiniApp, &payload, unix_now()).await?;
    Ok(signed_in_response(&app_state, signed))
}

/// Legacy login widget sign-in; the body is the widget's flat JSON object.
async fn telegram_login(
    body: ValidatedJson<serde_json::Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payload = SignedPayload::from_json(&body)?;
    let signed =
        auth_service::sign_in(&app_state, OriginFlow::LoginWidget, &payload, unix_now()).await?;
    Ok(signed_in_response(&app_state, signed))
}

async fn refresh(
    tokens: SessionTokens,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let pair = auth_service::refresh(&app_state, tokens.refresh.as_deref(), unix_now())?;

    let mut builder = HttpResponse::Ok();
    set_pair(&mut builder, &app_state.tokens, &pair);
    Ok(builder.json(SuccessResponse { success: true }))
}

async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(expired_cookie(TokenKind::Access))
        .cookie(expired_cookie(TokenKind::Refresh))
        .json(SuccessResponse { success: true })
}

async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signin", web::post().to(signin))
        .route("/telegram", web::post().to(telegram_login))
        .route("/refresh", web::post().to(refresh))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me));
}
