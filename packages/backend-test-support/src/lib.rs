//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, Problem Details assertions and an independent
//! signer for Telegram payloads so tests never sign with the code under test.

pub mod logging;
pub mod problem_details;
pub mod telegram;
