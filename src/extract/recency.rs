//! Relative-date recency evaluation.
//!
//! The search page stamps each result with a relative date like `3 days ago`
//! or `1 month ago` rather than a timestamp. This module decides whether such
//! a stamp falls inside a lookback window of N months, where a month is
//! approximated as 30 days (not calendar-aware, deliberately).
//!
//! Anything that does not parse — a stamp in another format, an unknown unit,
//! a count too large for date arithmetic — is treated as "not recent enough"
//! and logged, never raised.

use chrono::{DateTime, Duration, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Matches `<count> <unit> ago`, e.g. "5 hours ago", "2 weeks ago".
static RELATIVE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+(\w+)\s+ago").unwrap());

/// A lookback window expressed in months, with 30 days to the month.
///
/// A window of 0 months is normalized to 1; callers may pass a raw work-item
/// value straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    months_back: u32,
}

impl RecencyWindow {
    pub fn new(months_back: u32) -> Self {
        Self {
            months_back: months_back.max(1),
        }
    }

    pub fn months_back(&self) -> u32 {
        self.months_back
    }

    /// Oldest age, in whole days, still inside the window. Inclusive.
    pub fn max_age_days(&self) -> i64 {
        i64::from(self.months_back) * 30
    }
}

/// Decide whether `date_text` dates the result inside `window`, measured
/// against `now`.
///
/// The elapsed time implied by the stamp is converted to whole days
/// (truncating, so "5 hours ago" is 0 days) and compared inclusively against
/// [`RecencyWindow::max_age_days`]. Returns false for any stamp that does not
/// match `<count> <unit> ago` with a unit word starting with `hour`, `day`,
/// `week`, `month`, or `year`.
pub fn published_within(date_text: &str, now: DateTime<Local>, window: &RecencyWindow) -> bool {
    let Some(captures) = RELATIVE_DATE.captures(date_text) else {
        debug!(%date_text, "Date text is not a relative date; treating as out of window");
        return false;
    };

    // Both groups matched the regex, so indexing and the integer parse can
    // only fail on a count exceeding i64.
    let Ok(count) = captures[1].parse::<i64>() else {
        warn!(%date_text, "Relative date count out of range");
        return false;
    };
    let unit = &captures[2];

    let elapsed = if unit.starts_with("hour") {
        Duration::try_hours(count)
    } else if unit.starts_with("day") {
        Duration::try_days(count)
    } else if unit.starts_with("week") {
        Duration::try_weeks(count)
    } else if unit.starts_with("month") {
        count.checked_mul(30).and_then(Duration::try_days)
    } else if unit.starts_with("year") {
        count.checked_mul(365).and_then(Duration::try_days)
    } else {
        warn!(%date_text, %unit, "Unrecognized relative date unit");
        return false;
    };

    // checked_sub_signed: a count large enough to leave the representable
    // date range is malformed input, not a panic.
    let Some(target) = elapsed.and_then(|elapsed| now.checked_sub_signed(elapsed)) else {
        warn!(%date_text, "Relative date overflows date arithmetic");
        return false;
    };
    let age_days = (now - target).num_days();
    debug!(%date_text, age_days, max_age_days = window.max_age_days(), "Evaluated recency");
    age_days <= window.max_age_days()
}
