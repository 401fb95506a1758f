pub mod auth;
pub mod goals;
pub mod users;
