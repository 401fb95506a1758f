//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps to
//! `DomainError`.

pub mod goals_sea;
pub mod users_sea;
