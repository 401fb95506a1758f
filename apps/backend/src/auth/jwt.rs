use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, TokenKind};
use crate::auth::error::AuthError;
use crate::auth::origin::TelegramUser;
use crate::state::security_config::SecurityConfig;

/// Access and refresh tokens, always minted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

/// Mints and verifies HS256 tokens with one secret per [`TokenKind`].
pub struct TokenIssuer {
    algorithm: Algorithm,
    access: KindKeys,
    refresh: KindKeys,
    max_session_lifetime_secs: Option<i64>,
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig) -> Self {
        let keys = |secret: &[u8], ttl_secs| KindKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        };
        Self {
            algorithm: security.algorithm,
            access: keys(&security.access_secret, security.access_ttl_secs),
            refresh: keys(&security.refresh_secret, security.refresh_ttl_secs),
            max_session_lifetime_secs: security.max_session_lifetime_secs,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KindKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn ttl_secs(&self, kind: TokenKind) -> i64 {
        self.keys(kind).ttl_secs
    }

    /// Mint a single token of `kind` for `subject`.
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &TelegramUser,
        now: i64,
        session_start: i64,
    ) -> Result<String, AuthError> {
        let keys = self.keys(kind);
        let exp = now
            .checked_add(keys.ttl_secs)
            .ok_or_else(|| AuthError::Signing("token expiry out of range".into()))?;
        let claims = Claims {
            sub: subject.id,
            username: subject.username.clone(),
            first_name: subject.first_name.clone(),
            last_name: subject.last_name.clone(),
            kind,
            iat: now,
            exp,
            sst: session_start,
        };

        encode(&Header::new(self.algorithm), &claims, &keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Mint a fresh pair starting a new session at `now`.
    pub fn issue_pair(&self, subject: &TelegramUser, now: i64) -> Result<TokenPair, AuthError> {
        self.pair_for_session(subject, now, now)
    }

    fn pair_for_session(
        &self,
        subject: &TelegramUser,
        now: i64,
        session_start: i64,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, subject, now, session_start)?,
            refresh_token: self.issue(TokenKind::Refresh, subject, now, session_start)?,
        })
    }

    /// Check signature, then expiry against `now` (no leeway), then the kind tag.
    pub fn verify(&self, kind: TokenKind, token: &str, now: i64) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is compared against the caller's clock below.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::SignatureMismatch,
                _ => AuthError::MalformedToken,
            })?;

        if claims.exp <= now {
            return Err(AuthError::ExpiredToken);
        }
        if claims.kind != kind {
            return Err(AuthError::TokenKindMismatch {
                expected: kind.as_str(),
                actual: claims.kind.as_str(),
            });
        }
        Ok(claims)
    }

    /// Exchange a valid refresh token for a new pair carrying the same subject
    /// and session start.
    pub fn rotate(&self, refresh_token: &str, now: i64) -> Result<TokenPair, AuthError> {
        let claims = self.verify(TokenKind::Refresh, refresh_token, now)?;

        if let Some(max) = self.max_session_lifetime_secs {
            if now - claims.sst > max {
                return Err(AuthError::SessionExpired);
            }
        }

        self.pair_for_session(&claims.subject(), now, claims.sst)
    }
}
