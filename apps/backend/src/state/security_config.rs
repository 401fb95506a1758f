use std::env;
use std::fmt;

use jsonwebtoken::Algorithm;
use tracing::warn;

use crate::config::db::must_var;
use crate::error::AppError;

pub const DEFAULT_ACCESS_TTL_SECS: i64 = 300;
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;
/// Upper bound for any configured lifetime (ten years).
pub const MAX_CONFIGURED_SECS: i64 = 315_360_000;

/// Secrets and lifetimes for origin verification and session tokens.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Telegram bot token; keys both origin flows
    pub bot_token: String,
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    /// Absolute session cap enforced at rotation; `None` means sliding forever
    pub max_session_lifetime_secs: Option<i64>,
    /// JWT algorithm to use (HS256)
    pub algorithm: Algorithm,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("bot_token", &"[REDACTED]")
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("max_session_lifetime_secs", &self.max_session_lifetime_secs)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SecurityConfig {
    pub fn new(
        bot_token: impl Into<String>,
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            max_session_lifetime_secs: None,
            algorithm: Algorithm::HS256,
        }
    }

    /// Read the security settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::new(
            must_var("TELEGRAM_BOT_TOKEN")?,
            must_var("JWT_ACCESS_SECRET")?,
            must_var("JWT_REFRESH_SECRET")?,
        );
        if config.access_secret == config.refresh_secret {
            warn!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET are identical; token kinds are separated only by the type claim");
        }

        if let Some(ttl) = positive_secs("ACCESS_TOKEN_TTL_SECS")? {
            config.access_ttl_secs = ttl;
        }
        if let Some(ttl) = positive_secs("REFRESH_TOKEN_TTL_SECS")? {
            config.refresh_ttl_secs = ttl;
        }
        config.max_session_lifetime_secs = positive_secs("SESSION_MAX_LIFETIME_SECS")?;
        Ok(config)
    }

    /// Fixed, distinct secrets and bot token `"T"`.
    pub fn for_tests() -> Self {
        Self::new(
            "T",
            b"test-access-secret".to_vec(),
            b"test-refresh-secret".to_vec(),
        )
    }
}

fn positive_secs(name: &str) -> Result<Option<i64>, AppError> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > MAX_CONFIGURED_SECS => Err(AppError::config(format!(
            "{name} must be at most {MAX_CONFIGURED_SECS} seconds, got '{raw}'"
        ))),
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => Err(AppError::config(format!(
            "{name} must be a positive number of seconds, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 6] = [
        "TELEGRAM_BOT_TOKEN",
        "JWT_ACCESS_SECRET",
        "JWT_REFRESH_SECRET",
        "ACCESS_TOKEN_TTL_SECS",
        "REFRESH_TOKEN_TTL_SECS",
        "SESSION_MAX_LIFETIME_SECS",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn set_required() {
        env::set_var("TELEGRAM_BOT_TOKEN", "123:abc");
        env::set_var("JWT_ACCESS_SECRET", "a");
        env::set_var("JWT_REFRESH_SECRET", "r");
    }

    #[test]
    #[serial]
    fn defaults_apply() {
        clear();
        set_required();
        let config = SecurityConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.access_ttl_secs, 300);
        assert_eq!(config.refresh_ttl_secs, 604_800);
        assert_eq!(config.max_session_lifetime_secs, None);
        clear();
    }

    #[test]
    #[serial]
    fn overrides_apply() {
        clear();
        set_required();
        env::set_var("ACCESS_TOKEN_TTL_SECS", "60");
        env::set_var("SESSION_MAX_LIFETIME_SECS", "86400");
        let config = SecurityConfig::from_env().unwrap();
        assert_eq!(config.access_ttl_secs, 60);
        assert_eq!(config.max_session_lifetime_secs, Some(86_400));
        clear();
    }

    #[test]
    #[serial]
    fn rejects_missing_or_bad_values() {
        clear();
        let err = SecurityConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));

        set_required();
        env::set_var("REFRESH_TOKEN_TTL_SECS", "-5");
        let err = SecurityConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("REFRESH_TOKEN_TTL_SECS"));
        clear();
    }

    #[test]
    #[serial]
    fn rejects_lifetimes_past_the_ceiling() {
        clear();
        set_required();
        env::set_var("REFRESH_TOKEN_TTL_SECS", i64::MAX.to_string());
        let err = SecurityConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("at most"));

        env::set_var("REFRESH_TOKEN_TTL_SECS", MAX_CONFIGURED_SECS.to_string());
        let config = SecurityConfig::from_env().unwrap();
        assert_eq!(config.refresh_ttl_secs, MAX_CONFIGURED_SECS);
        clear();
    }

    #[test]
    fn debug_hides_secrets() {
        let rendered = format!("{:?}", SecurityConfig::for_tests());
        assert!(!rendered.contains("test-access-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
