//! Telegram data-origin verification.
//!
//! Both the legacy login widget and the Mini App bridge sign a flat set of
//! `key=value` fields with HMAC-SHA256. They differ only in how the HMAC key
//! is derived from the bot token and in how long a payload stays fresh.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Which Telegram surface produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginFlow {
    /// Legacy login widget, JSON body with flat user fields.
    LoginWidget,
    /// Mini App `initData` query string with a JSON-encoded `user` field.
    MiniApp,
}

impl OriginFlow {
    /// Seconds a signed payload stays acceptable after `auth_date`.
    pub const fn window_secs(self) -> i64 {
        match self {
            OriginFlow::LoginWidget => 60,
            OriginFlow::MiniApp => 3600,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OriginFlow::LoginWidget => "login_widget",
            OriginFlow::MiniApp => "mini_app",
        }
    }

    fn secret(self, bot_token: &str) -> Result<Vec<u8>, AuthError> {
        match self {
            OriginFlow::LoginWidget => Ok(Sha256::digest(bot_token.as_bytes()).to_vec()),
            OriginFlow::MiniApp => {
                let mut mac = new_mac(b"WebAppData")?;
                mac.update(bot_token.as_bytes());
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}

fn new_mac(key: &[u8]) -> Result<HmacSha256, AuthError> {
    <HmacSha256 as Mac>::new_from_slice(key).map_err(|e| AuthError::Signing(e.to_string()))
}

/// Unverified signed fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedPayload {
    fields: BTreeMap<String, String>,
}

impl SignedPayload {
    /// Parse a URL-query-encoded `initData` string. The first occurrence of a
    /// repeated key wins.
    pub fn from_query(init_data: &str) -> Self {
        let mut fields = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(init_data.as_bytes()) {
            fields
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { fields }
    }

    /// Flatten a login widget JSON object. Numbers and booleans are stringified
    /// the way Telegram signs them; `null` members are dropped.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AuthError> {
        let object = value
            .as_object()
            .ok_or_else(|| AuthError::MalformedPayload("expected a JSON object".into()))?;

        let fields = object
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), text))
            })
            .collect();
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignedPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = BTreeMap::new();
        for (k, v) in iter {
            fields.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { fields }
    }
}

/// Subject fields Telegram asserts about the signing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Payload whose origin and freshness have been established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayload {
    pub fields: BTreeMap<String, String>,
    pub auth_date: i64,
    pub query_id: Option<String>,
    pub user: Option<TelegramUser>,
}

/// `key=value` lines for every field except `hash`, sorted by key, joined by `\n`.
pub fn data_check_string(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks Telegram signatures against the configured bot token.
#[derive(Clone)]
pub struct OriginVerifier {
    bot_token: String,
}

impl std::fmt::Debug for OriginVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OriginVerifier")
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

impl OriginVerifier {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
        }
    }

    /// Verify freshness, then the signature, then decode the subject.
    pub fn verify(
        &self,
        flow: OriginFlow,
        payload: &SignedPayload,
        now: i64,
    ) -> Result<VerifiedPayload, AuthError> {
        let auth_date = payload
            .get("auth_date")
            .ok_or_else(|| AuthError::MalformedPayload("missing auth_date".into()))?
            .parse::<i64>()
            .map_err(|_| AuthError::MalformedPayload("auth_date is not an integer".into()))?;

        let age_secs = now.saturating_sub(auth_date);
        let window = flow.window_secs();
        if age_secs > window {
            return Err(AuthError::ExpiredPayload { age_secs });
        }
        if flow == OriginFlow::LoginWidget && auth_date.saturating_sub(now) > window {
            return Err(AuthError::ExpiredPayload { age_secs });
        }

        let received = payload
            .get("hash")
            .ok_or_else(|| AuthError::MalformedPayload("missing hash".into()))?;
        let received = hex::decode(received).map_err(|_| AuthError::SignatureMismatch)?;

        let mut mac = new_mac(&flow.secret(&self.bot_token)?)?;
        mac.update(data_check_string(payload.fields()).as_bytes());
        mac.verify_slice(&received)
            .map_err(|_| AuthError::SignatureMismatch)?;

        let user = match flow {
            OriginFlow::MiniApp => payload
                .get("user")
                .map(|raw| {
                    serde_json::from_str::<TelegramUser>(raw)
                        .map_err(|e| AuthError::MalformedPayload(format!("user: {e}")))
                })
                .transpose()?,
            OriginFlow::LoginWidget => flat_user(payload)?,
        };

        let mut fields = payload.fields().clone();
        fields.remove("hash");

        Ok(VerifiedPayload {
            query_id: fields.get("query_id").cloned(),
            fields,
            auth_date,
            user,
        })
    }
}

fn flat_user(payload: &SignedPayload) -> Result<Option<TelegramUser>, AuthError> {
    let Some(id) = payload.get("id") else {
        return Ok(None);
    };
    let id = id
        .parse::<i64>()
        .map_err(|_| AuthError::MalformedPayload("id is not an integer".into()))?;
    let owned = |key: &str| payload.get(key).map(str::to_owned);
    Ok(Some(TelegramUser {
        id,
        username: owned("username"),
        first_name: owned("first_name"),
        last_name: owned("last_name"),
    }))
}
