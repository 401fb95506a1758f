//! SeaORM adapter for user repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::TelegramUserUpsert;

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_user_by_telegram_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    telegram_id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::TelegramId.eq(telegram_id))
        .one(conn)
        .await
}

/// Insert the account if it is new, otherwise refresh its display fields.
///
/// Returns the stored row and whether it was created by this call.
pub async fn upsert_telegram_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TelegramUserUpsert,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let user_active = users::ActiveModel {
        id: NotSet,
        telegram_id: Set(dto.telegram_id.clone()),
        username: Set(dto.username.clone()),
        first_name: Set(dto.first_name.clone()),
        last_name: Set(dto.last_name.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::TelegramId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    let inserted = rows == 1;

    let existing = find_user_by_telegram_id(conn, &dto.telegram_id)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound("users.telegram_id not found".to_string())
        })?;
    if inserted {
        return Ok((existing, true));
    }

    let mut active = existing.into_active_model();
    active.username = Set(dto.username);
    active.first_name = Set(dto.first_name);
    active.last_name = Set(dto.last_name);
    active.updated_at = Set(now);
    let updated = active.update(conn).await?;
    Ok((updated, false))
}
