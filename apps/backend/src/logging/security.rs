use tracing::{info, warn};

use crate::auth::error::AuthError;
use crate::trace_ctx;

/// Log a rejected authentication attempt. Never records the credential itself.
pub fn auth_failed(stage: &'static str, err: &AuthError) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_FAILED",
        %trace_id,
        stage,
        reason = err.kind(),
        "Authentication failure"
    );
}

/// Log a successful sign-in for a Telegram account.
pub fn signed_in(flow: &'static str, telegram_id: i64, created: bool) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_SIGNED_IN",
        %trace_id,
        flow,
        telegram_id,
        created,
        "Telegram sign-in"
    );
}

/// Log a refresh-token rotation.
pub fn session_rotated(telegram_id: i64) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_SESSION_ROTATED",
        %trace_id,
        telegram_id,
        "Session tokens rotated"
    );
}
