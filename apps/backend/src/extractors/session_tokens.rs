use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::auth::claims::TokenKind;
use crate::error::AppError;

/// Raw credentials presented with a request. Never fails; absent tokens are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl SessionTokens {
    pub fn from_request_parts(req: &HttpRequest) -> Self {
        let cookie = |kind: TokenKind| {
            req.cookie(kind.cookie_name())
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            access: cookie(TokenKind::Access).or_else(|| bearer_token(req)),
            refresh: cookie(TokenKind::Refresh),
        }
    }
}

/// `Authorization: Bearer <token>`; scheme match is case-insensitive.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

impl FromRequest for SessionTokens {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_request_parts(req)))
    }
}
