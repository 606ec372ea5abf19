//! Study-day calendar.
//!
//! Due dates and session resets are compared by calendar day rather than by
//! instant. A study day is the local date under a fixed UTC offset, shifted
//! back by one when the local hour is before the daily reset hour. This lets
//! a late-night session count towards the previous day.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyCalendar {
    offset: FixedOffset,
    reset_hour: u32,
}

impl Default for StudyCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl StudyCalendar {
    /// Calendar in the given offset. Reset hours past 23 are clamped.
    pub fn new(offset: FixedOffset, reset_hour: u32) -> Self {
        Self {
            offset,
            reset_hour: reset_hour.min(23),
        }
    }

    /// UTC days starting at midnight.
    pub fn utc() -> Self {
        Self::new(Utc.fix(), 0)
    }

    pub fn with_reset_hour(self, reset_hour: u32) -> Self {
        Self::new(self.offset, reset_hour)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn reset_hour(&self) -> u32 {
        self.reset_hour
    }

    /// The study day an instant falls on.
    pub fn study_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        let local = instant.with_timezone(&self.offset);
        let date = local.date_naive();

        if local.hour() < self.reset_hour {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    /// Whether two instants fall on the same study day.
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.study_day(a) == self.study_day(b)
    }

    /// Whether something scheduled for `due` may be shown at `now`.
    ///
    /// Anything due today or on an earlier day counts, even if the due
    /// instant itself is later today.
    pub fn is_due(&self, due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.study_day(due) <= self.study_day(now)
    }
}
