//! Telegram origin verification and session tokens.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod origin;
pub mod resolver;

pub use claims::{Claims, TokenKind};
pub use error::AuthError;
pub use jwt::{TokenIssuer, TokenPair};
pub use origin::{OriginFlow, OriginVerifier, SignedPayload, TelegramUser, VerifiedPayload};
pub use resolver::{resolve_current_user, ResolvedSession};
