//! Absolute time intervals.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An absolute time range `[start, end]`.
///
/// Two intervals overlap only when they share a span of positive length;
/// intervals that merely touch at an endpoint do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end.
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates an interval.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whether the interval has zero or negative length.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Length in hours as a [`Decimal`].
    pub fn hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes(), 0) / Decimal::new(60, 0)
    }

    /// Whether the two intervals share a span of positive length.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Removes `other` from this interval.
    ///
    /// Returns the portion before `other` and the portion after it, either
    /// of which may be absent. A non-overlapping `other` leaves the interval
    /// unchanged.
    pub fn minus(&self, other: &TimeInterval) -> Vec<TimeInterval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        if self.start < other.start {
            pieces.push(TimeInterval::new(self.start, other.start));
        }
        if other.end < self.end {
            pieces.push(TimeInterval::new(other.end, self.end));
        }
        pieces
    }
}
