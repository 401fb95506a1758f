use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::goals_sea::{GoalCreate, GoalUpdate};
use crate::errors::domain::DomainError;
use crate::repos::goals::{self as goals_repo, Goal};

/// Fields accepted when creating a goal.
#[derive(Debug, Clone, Default)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub is_completed: bool,
}

fn validated_title(title: &str) -> Result<String, DomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Goal title must not be empty"));
    }
    Ok(trimmed.to_string())
}

pub async fn create_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    new_goal: NewGoal,
) -> Result<Goal, DomainError> {
    let dto = GoalCreate {
        user_id,
        title: validated_title(&new_goal.title)?,
        description: new_goal.description,
        deadline: new_goal.deadline,
        is_completed: new_goal.is_completed,
    };
    goals_repo::create_goal(conn, dto).await
}

pub async fn list_goals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Goal>, DomainError> {
    goals_repo::list_goals(conn, user_id).await
}

pub async fn get_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<Goal, DomainError> {
    goals_repo::require_goal(conn, user_id, goal_id).await
}

pub async fn update_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut update: GoalUpdate,
) -> Result<Goal, DomainError> {
    if let Some(title) = update.title.take() {
        update.title = Some(validated_title(&title)?);
    }
    goals_repo::update_goal(conn, update).await
}

pub async fn delete_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<(), DomainError> {
    goals_repo::delete_goal(conn, user_id, goal_id).await
}
