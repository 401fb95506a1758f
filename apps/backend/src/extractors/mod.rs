pub mod current_user;
pub mod goal_id;
pub mod session_tokens;
pub mod validated_json;

pub use current_user::{CurrentUser, RotatedSession};
pub use goal_id::GoalId;
pub use session_tokens::SessionTokens;
pub use validated_json::ValidatedJson;
