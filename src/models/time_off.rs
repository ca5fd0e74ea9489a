//! Time-off records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;

/// An absolute time range during which a person cannot work.
///
/// May span several days or part of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    /// The person taking time off.
    pub person_id: String,
    /// Start of the time off.
    pub start: NaiveDateTime,
    /// End of the time off.
    pub end: NaiveDateTime,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl TimeOff {
    /// The time off as an interval.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    /// Whether any part of the time off falls on `date`.
    pub fn touches_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }
}
