use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenIssuer;
use crate::auth::origin::OriginVerifier;

/// Immutable, shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent only in DB-less test scenarios)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub verifier: OriginVerifier,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self::assemble(Some(db), security)
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self::assemble(None, security)
    }

    fn assemble(db: Option<DatabaseConnection>, security: SecurityConfig) -> Self {
        Self {
            db,
            verifier: OriginVerifier::new(security.bot_token.clone()),
            tokens: Arc::new(TokenIssuer::new(&security)),
            security,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
