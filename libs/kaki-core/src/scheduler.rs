//! Fixed-ease spaced repetition scheduling.
//!
//! A correct answer multiplies the interval by the item's easing factor; an
//! incorrect one resets it to a single day and makes the item due at once.
//! The easing factor itself never changes here.
//!
//! The next due date is measured from the interval the learner has just
//! completed, not the lengthened one: an item at interval 2 with ease 2.0
//! comes back in 2 days and is stored with interval 4.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::StudyItem;

/// Milliseconds in one interval day.
pub const DAY_MS: f64 = 86_400_000.0;

/// Result of scheduling an item after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub interval: f64,
    pub due: DateTime<Utc>,
}

/// Calculate the next interval and due date for `item`.
pub fn advance(item: &StudyItem, was_correct: bool, now: DateTime<Utc>) -> SchedulingResult {
    if !was_correct {
        return SchedulingResult {
            interval: 1.0,
            due: now,
        };
    }

    SchedulingResult {
        interval: item.interval * item.easing_factor,
        due: due_after(now, item.interval),
    }
}

/// `now` plus `days`, saturating at the latest representable instant.
fn due_after(now: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    // Float-to-int casts saturate, so only the chrono range can overflow.
    let millis = (days * DAY_MS).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|delay| now.checked_add_signed(delay))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
