//! DTOs for users_sea adapter.

/// Display fields Telegram asserts for an account on each sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramUserUpsert {
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl TelegramUserUpsert {
    pub fn new(telegram_id: impl Into<String>) -> Self {
        Self {
            telegram_id: telegram_id.into(),
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}
