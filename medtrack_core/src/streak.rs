//! Global adherence streak computation.
//!
//! The streak is the number of consecutive calendar days, ending today, on
//! which every enabled medicine was marked taken. It is recomputed from
//! scratch against the latest store state whenever the summary is needed;
//! history sizes are small enough that incremental maintenance would buy
//! nothing.

use crate::dates::{date_key, today};
use crate::Medicine;
use chrono::NaiveDate;

/// Upper bound on the backward walk. A streak is never reported above
/// this, even when the true unbroken run is longer.
pub const MAX_STREAK_DAYS: u32 = 365;

/// Compute the global streak as of the local calendar date
pub fn compute_global_streak(medicines: &[Medicine]) -> u32 {
    streak_as_of(medicines, today())
}

/// Compute the global streak ending on the given date.
///
/// Walks backward one day at a time, counting days on which every enabled
/// medicine's history contains the cursor's date key, and stops at the
/// first incomplete day or after [`MAX_STREAK_DAYS`] iterations. With no
/// enabled medicines the streak is 0: nothing to be consistent about.
/// Never fails; always returns a well-defined count.
pub fn streak_as_of(medicines: &[Medicine], today: NaiveDate) -> u32 {
    let active: Vec<&Medicine> = medicines.iter().filter(|m| m.enabled).collect();
    if active.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = today;

    for _ in 0..MAX_STREAK_DAYS {
        let key = date_key(cursor);
        if !active.iter().all(|m| m.taken_on(&key)) {
            break;
        }

        streak += 1;
        cursor = match cursor.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }

    streak
}
