use crate::auth::claims::{Claims, TokenKind};
use crate::auth::error::AuthError;
use crate::auth::jwt::{TokenIssuer, TokenPair};

/// Outcome of resolving a request's credentials.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub claims: Claims,
    /// Present when the access token was unusable and the refresh token was rotated.
    pub rotated: Option<TokenPair>,
}

impl ResolvedSession {
    pub fn telegram_id(&self) -> i64 {
        self.claims.sub
    }
}

/// Prefer the access token; fall back to rotating the refresh token.
///
/// With neither token the result is `MissingCredential`; otherwise the failure
/// of the last credential tried is returned.
pub fn resolve_current_user(
    issuer: &TokenIssuer,
    access: Option<&str>,
    refresh: Option<&str>,
    now: i64,
) -> Result<ResolvedSession, AuthError> {
    let mut last_err = None;

    if let Some(token) = access {
        match issuer.verify(TokenKind::Access, token, now) {
            Ok(claims) => {
                return Ok(ResolvedSession {
                    claims,
                    rotated: None,
                })
            }
            Err(e) => last_err = Some(e),
        }
    }

    if let Some(token) = refresh {
        let pair = issuer.rotate(token, now)?;
        let claims = issuer.verify(TokenKind::Access, &pair.access_token, now)?;
        return Ok(ResolvedSession {
            claims,
            rotated: Some(pair),
        });
    }

    Err(last_err.unwrap_or(AuthError::MissingCredential))
}
