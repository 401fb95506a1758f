use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive goal id from the `{goal_id}` path segment. Ownership is checked by
/// the goal queries, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalId(pub i64);

fn parse_goal_id(req: &HttpRequest) -> Result<GoalId, AppError> {
    let raw = req.match_info().get("goal_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidGoalId, "Missing goal_id parameter")
    })?;

    let goal_id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidGoalId, format!("Invalid goal id: {raw}"))
    })?;
    if goal_id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGoalId,
            format!("Goal id must be positive, got: {goal_id}"),
        ));
    }
    Ok(GoalId(goal_id))
}

impl FromRequest for GoalId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_goal_id(req))
    }
}
