#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod utils;

// Re-exports for public API
pub use auth::{
    resolve_current_user, Claims, OriginFlow, OriginVerifier, ResolvedSession, SignedPayload,
    TelegramUser, TokenIssuer, TokenKind, TokenPair, VerifiedPayload,
};
pub use config::db::{db_url, DbKind, DbOwner, DbProfile};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{CurrentUser, SessionTokens};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{
    cors_middleware, RequestTrace, SessionCookies, StructuredLogger, TraceSpan,
};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
