//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea::{self as users_adapter, TelegramUserUpsert};
use crate::auth::origin::TelegramUser;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_telegram_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    telegram_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_telegram_id(conn, &telegram_id.to_string()).await?;
    Ok(user.map(User::from))
}

/// Create on first sight, otherwise refresh display fields. `true` when created.
pub async fn upsert_telegram_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject: &TelegramUser,
) -> Result<(User, bool), DomainError> {
    let dto = TelegramUserUpsert::new(subject.id.to_string())
        .with_username(subject.username.clone())
        .with_names(subject.first_name.clone(), subject.last_name.clone());
    let (user, created) = users_adapter::upsert_telegram_user(conn, dto).await?;
    Ok((User::from(user), created))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            telegram_id: model.telegram_id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
