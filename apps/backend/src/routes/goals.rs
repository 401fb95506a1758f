use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::adapters::goals_sea::GoalUpdate;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, GoalId, ValidatedJson};
use crate::repos::goals::Goal;
use crate::services::goals::{self as goals_service, NewGoal};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Absent fields stay untouched; explicit `null` clears `description`/`deadline`.
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub deadline: Option<Option<String>>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deadline: Option<OffsetDateTime>,
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            user_id: goal.user_id,
            title: goal.title,
            description: goal.description,
            deadline: goal.deadline,
            is_completed: goal.is_completed,
            created_at: goal.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    detail: &'static str,
}

fn parse_deadline(raw: &str) -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
        AppError::invalid(
            ErrorCode::ValidationError,
            "deadline must be an RFC 3339 timestamp",
        )
    })
}

async fn create_goal(
    user: CurrentUser,
    body: ValidatedJson<CreateGoalRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();

    let new_goal = NewGoal {
        title: body.title,
        description: body.description,
        deadline: body.deadline.as_deref().map(parse_deadline).transpose()?,
        is_completed: body.is_completed,
    };
    let goal = goals_service::create_goal(db, user.id, new_goal).await?;
    Ok(HttpResponse::Created().json(GoalResponse::from(goal)))
}

async fn list_goals(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let goals = goals_service::list_goals(db, user.id).await?;
    let body: Vec<GoalResponse> = goals.into_iter().map(GoalResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_goal(
    user: CurrentUser,
    goal_id: GoalId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let goal = goals_service::get_goal(db, user.id, goal_id.0).await?;
    Ok(HttpResponse::Ok().json(GoalResponse::from(goal)))
}

async fn update_goal(
    user: CurrentUser,
    goal_id: GoalId,
    body: ValidatedJson<UpdateGoalRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();

    let mut update = GoalUpdate::new(goal_id.0, user.id);
    if let Some(title) = body.title {
        update = update.with_title(title);
    }
    if let Some(description) = body.description {
        update = update.with_description(description);
    }
    if let Some(deadline) = body.deadline {
        update = update.with_deadline(deadline.as_deref().map(parse_deadline).transpose()?);
    }
    if let Some(is_completed) = body.is_completed {
        update = update.with_completed(is_completed);
    }

    let goal = goals_service::update_goal(db, update).await?;
    Ok(HttpResponse::Ok().json(GoalResponse::from(goal)))
}

async fn delete_goal(
    user: CurrentUser,
    goal_id: GoalId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    goals_service::delete_goal(db, user.id, goal_id.0).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        detail: "Goal deleted",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_goals))
            .route(web::post().to(create_goal)),
    )
    .service(
        web::resource("/{goal_id}")
            .route(web::get().to(get_goal))
            .route(web::put().to(update_goal))
            .route(web::patch().to(update_goal))
            .route(web::delete().to(delete_goal)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_null() {
        let absent: UpdateGoalRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(absent.deadline, None);

        let cleared: UpdateGoalRequest =
            serde_json::from_str(r#"{"description":null,"deadline":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert_eq!(cleared.deadline, Some(None));

        let set: UpdateGoalRequest =
            serde_json::from_str(r#"{"description":"d","is_completed":true}"#).unwrap();
        assert_eq!(set.description, Some(Some("d".to_string())));
        assert_eq!(set.is_completed, Some(true));
    }

    #[test]
    fn deadline_parsing() {
        assert!(parse_deadline("2026-01-31T12:00:00Z").is_ok());
        let err = parse_deadline("next tuesday").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }
}
