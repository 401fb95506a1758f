//! Goal repository. Lookups by id alone do not exist; every call names the owner.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::goals_sea::{self as goals_adapter, GoalCreate, GoalUpdate};
use crate::errors::domain::DomainError;

/// Goal domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub is_completed: bool,
    pub created_at: OffsetDateTime,
}

pub async fn create_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GoalCreate,
) -> Result<Goal, DomainError> {
    let goal = goals_adapter::create_goal(conn, dto).await?;
    Ok(Goal::from(goal))
}

/// `NotFound(Goal)` both for a missing id and for someone else's goal.
pub async fn require_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<Goal, DomainError> {
    goals_adapter::find_goal_for_user(conn, user_id, goal_id)
        .await?
        .map(Goal::from)
        .ok_or_else(DomainError::goal_not_found)
}

pub async fn list_goals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Goal>, DomainError> {
    let goals = goals_adapter::list_goals_for_user(conn, user_id).await?;
    Ok(goals.into_iter().map(Goal::from).collect())
}

pub async fn update_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GoalUpdate,
) -> Result<Goal, DomainError> {
    goals_adapter::update_goal_for_user(conn, dto)
        .await?
        .map(Goal::from)
        .ok_or_else(DomainError::goal_not_found)
}

pub async fn delete_goal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    goal_id: i64,
) -> Result<(), DomainError> {
    match goals_adapter::delete_goal_for_user(conn, user_id, goal_id).await? {
        0 => Err(DomainError::goal_not_found()),
        _ => Ok(()),
    }
}

impl From<crate::entities::goals::Model> for Goal {
    fn from(model: crate::entities::goals::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            deadline: model.deadline,
            is_completed: model.is_completed,
            created_at: model.created_at,
        }
    }
}
