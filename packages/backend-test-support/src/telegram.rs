//! Independent Telegram payload signer for tests.
//!
//! Computes the `hash` field exactly as Telegram documents it, so tests can
//! produce genuine payloads without calling into the verifier under test.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Secret for Mini App `initData`: HMAC_SHA256(key="WebAppData", bot_token)
pub fn mini_app_secret(bot_token: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(b"WebAppData").expect("HMAC can take key of any size");
    mac.update(bot_token.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Secret for the login widget: SHA256(bot_token)
pub fn login_widget_secret(bot_token: &str) -> Vec<u8> {
    Sha256::digest(bot_token.as_bytes()).to_vec()
}

/// Hex HMAC over the sorted `key=value` lines (excluding `hash`).
pub fn sign_fields(secret: &[u8], fields: &BTreeMap<String, String>) -> String {
    let data_check_string = fields
        .iter()
        .filter(|(k, _)| k.as_str() != "hash")
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(data_check_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Build signed Mini App fields (hash included) for the given user JSON.
pub fn signed_mini_app_fields(
    bot_token: &str,
    user_json: &str,
    auth_date: i64,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("auth_date".to_string(), auth_date.to_string());
    fields.insert("query_id".to_string(), "AAHdF6IQAAAAAN0XohDhrOrc".to_string());
    fields.insert("user".to_string(), user_json.to_string());
    let hash = sign_fields(&mini_app_secret(bot_token), &fields);
    fields.insert("hash".to_string(), hash);
    fields
}

/// URL-encode signed fields the way the Mini App bridge hands them over.
pub fn to_init_data(fields: &BTreeMap<String, String>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish()
}

/// Signed Mini App `initData` query string for the given user JSON.
pub fn signed_init_data(bot_token: &str, user_json: &str, auth_date: i64) -> String {
    to_init_data(&signed_mini_app_fields(bot_token, user_json, auth_date))
}

/// Signed login widget JSON body with flat user fields.
pub fn signed_login_widget_json(
    bot_token: &str,
    id: i64,
    username: &str,
    auth_date: i64,
) -> serde_json::Value {
    let mut fields = BTreeMap::new();
    fields.insert("auth_date".to_string(), auth_date.to_string());
    fields.insert("first_name".to_string(), "Test".to_string());
    fields.insert("id".to_string(), id.to_string());
    fields.insert("username".to_string(), username.to_string());
    let hash = sign_fields(&login_widget_secret(bot_token), &fields);

    serde_json::json!({
        "id": id,
        "first_name": "Test",
        "username": username,
        "auth_date": auth_date,
        "hash": hash,
    })
}

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock after epoch")
        .as_secs() as i64
}
