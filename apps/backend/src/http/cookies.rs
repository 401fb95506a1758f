//! Session cookie construction.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpResponseBuilder;

use crate::auth::claims::TokenKind;
use crate::auth::jwt::{TokenIssuer, TokenPair};

fn base(kind: TokenKind, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build(kind.cookie_name(), value)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .finish()
}

/// Cookie carrying `token`, living as long as tokens of its kind.
pub fn session_cookie(issuer: &TokenIssuer, kind: TokenKind, token: &str) -> Cookie<'static> {
    base(
        kind,
        token.to_string(),
        Duration::seconds(issuer.ttl_secs(kind)),
    )
}

/// Both cookies for a freshly minted pair.
pub fn pair_cookies(issuer: &TokenIssuer, pair: &TokenPair) -> [Cookie<'static>; 2] {
    [
        session_cookie(issuer, TokenKind::Access, &pair.access_token),
        session_cookie(issuer, TokenKind::Refresh, &pair.refresh_token),
    ]
}

/// Cookie that makes the browser drop `kind` immediately.
pub fn expired_cookie(kind: TokenKind) -> Cookie<'static> {
    base(kind, String::new(), Duration::ZERO)
}

pub fn set_pair(builder: &mut HttpResponseBuilder, issuer: &TokenIssuer, pair: &TokenPair) {
    for cookie in pair_cookies(issuer, pair) {
        builder.cookie(cookie);
    }
}
