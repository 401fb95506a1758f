use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::auth::origin::TelegramUser;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::users::{self as users_repo, User};

/// Ensure a user row exists for a verified Telegram subject and carries its
/// latest display fields. Idempotent per Telegram id.
pub async fn upsert_telegram_user(
    db: &DatabaseConnection,
    subject: &TelegramUser,
) -> Result<(User, bool), AppError> {
    let txn = db.begin().await?;
    let (user, created) = users_repo::upsert_telegram_user(&txn, subject).await?;
    txn.commit().await?;

    if created {
        info!(user_id = user.id, telegram_id = subject.id, "First user creation");
    } else {
        debug!(user_id = user.id, telegram_id = subject.id, "Repeat sign-in for existing user");
    }
    Ok((user, created))
}

/// Internal user for a token subject. A subject with no row is forbidden, not
/// unauthenticated: the token is genuine but the account is gone.
pub async fn user_for_telegram_id(
    db: &DatabaseConnection,
    telegram_id: i64,
) -> Result<User, AppError> {
    users_repo::find_user_by_telegram_id(db, telegram_id)
        .await?
        .ok_or_else(AppError::forbidden_user_not_found)
}

pub async fn user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<User, AppError> {
    users_repo::find_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
}
