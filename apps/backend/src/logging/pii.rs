use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used to mask credentials before they reach the logs.
///
/// All patterns are literals known to compile.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact JWS: three base64url segments joined by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
        });
        &JWT_REGEX
    }

    /// `hash=<hex>` pairs from query-encoded Telegram payloads
    pub fn init_data_hash() -> &'static Regex {
        static HASH_PAIR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(hash=)[^&\s]+").unwrap()
        });
        &HASH_PAIR_REGEX
    }

    /// Hex token pattern: matches hexadecimal runs (≥16 chars)
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Masks bearer tokens and signatures in free text.
///
/// Order: JWTs first, then `hash=` pairs, then bare hex runs.
pub fn redact(input: &str) -> String {
    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_TOKEN]");
    let hash_redacted =
        PiiRegexRegistry::init_data_hash().replace_all(&jwt_redacted, "${1}[REDACTED_HASH]");
    PiiRegexRegistry::hex_token()
        .replace_all(&hash_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
