//! SeaORM adapter for goals. Every query is filtered by the owning user.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::goals;

pub mod dto;

pub use dto::{GoalCreate, GoalUpdate};

pub async fn create_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GoalCreate,
) -> Result<goals::Model, sea_orm::DbErr> {
    let goal_active = goals::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        description: Set(dto.description),
        deadline: Set(dto.deadline),
        is_completed: Set(dto.is_completed),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    goal_active.insert(conn).await
}

pub async fn find_goal_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<Option<goals::Model>, sea_orm::DbErr> {
    goals::Entity::find()
        .filter(goals::Column::Id.eq(goal_id))
        .filter(goals::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Newest first.
pub async fn list_goals_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<goals::Model>, sea_orm::DbErr> {
    goals::Entity::find()
        .filter(goals::Column::UserId.eq(user_id))
        .order_by_desc(goals::Column::CreatedAt)
        .order_by_desc(goals::Column::Id)
        .all(conn)
        .await
}

/// Apply the present fields. `Ok(None)` when no goal with this id belongs to the user.
pub async fn update_goal_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GoalUpdate,
) -> Result<Option<goals::Model>, sea_orm::DbErr> {
    let Some(existing) = find_goal_for_user(conn, dto.user_id, dto.id).await? else {
        return Ok(None);
    };
    if dto.is_empty() {
        return Ok(Some(existing));
    }

    let mut active = existing.into_active_model();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(description) = dto.description {
        active.description = Set(description);
    }
    if let Some(deadline) = dto.deadline {
        active.deadline = Set(deadline);
    }
    if let Some(is_completed) = dto.is_completed {
        active.is_completed = Set(is_completed);
    }
    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_goal_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = goals::Entity::delete_many()
        .filter(goals::Column::Id.eq(goal_id))
        .filter(goals::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
