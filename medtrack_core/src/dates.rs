//! Calendar-date keys and display-time formatting.
//!
//! Date keys are canonical `YYYY-MM-DD` strings. They are the storage and
//! comparison key everywhere intake history is recorded or queried; streak
//! membership checks are exact string equality on these keys.

use chrono::{Datelike, Local, NaiveDate};

/// Canonical `YYYY-MM-DD` key for a calendar date, zero-padded
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's local calendar date (wall clock, not UTC)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date key for today's local calendar date
pub fn today_key() -> String {
    date_key(today())
}

/// Render a 24-hour `(hour, minute)` pair as a 12-hour clock string.
///
/// Midnight and noon both display as 12: `(0, 5)` -> `"12:05 AM"`,
/// `(12, 0)` -> `"12:00 PM"`, `(13, 0)` -> `"1:00 PM"`.
pub fn format_display_time(hour: u32, minute: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let h = if hour % 12 == 0 { 12 } else { hour % 12 };
    format!("{}:{:02} {}", h, minute, suffix)
}
