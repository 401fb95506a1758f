use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Borrow the connection from AppState, or fail with `DbUnavailable`.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn missing_db_is_unavailable() {
        let app_state = AppState::new_without_db(SecurityConfig::for_tests());

        let error = require_db(&app_state).unwrap_err();
        assert!(matches!(error, AppError::DbUnavailable));
        assert_eq!(
            error.error_response().status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
