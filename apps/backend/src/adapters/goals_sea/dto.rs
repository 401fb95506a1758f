//! DTOs for goals_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a goal owned by `user_id`.
#[derive(Debug, Clone)]
pub struct GoalCreate {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub is_completed: bool,
}

/// Partial update of one goal, scoped to its owner.
///
/// Three-state optionals: None = no change, Some(None) = clear, Some(Some(v)) = set.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<OffsetDateTime>>,
    pub is_completed: Option<bool>,
}

impl GoalUpdate {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<OffsetDateTime>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.is_completed.is_none()
    }
}
