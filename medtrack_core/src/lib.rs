#![forbid(unsafe_code)]

//! Core domain model and business logic for the medtrack system.
//!
//! This crate provides:
//! - Domain types (medicines, the record store, permission state)
//! - Pure store operations (add, remove, toggle, mark-taken)
//! - The streak engine
//! - Date-key and display-time helpers
//! - Persistence and the reminder-scheduling seam

pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod reminders;
pub mod state;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use reminders::{JsonRegistry, ReminderScheduler};
pub use streak::{compute_global_streak, streak_as_of, MAX_STREAK_DAYS};
pub use tracker::Tracker;
pub use types::*;
