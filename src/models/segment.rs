//! Segment catalog types.
//!
//! A segment is a named portion of the working day with a nominal clock
//! window. The catalog assigns each segment its nominal window and a display
//! order; adjustment rules may move the window per person-day.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::interval::TimeInterval;

/// The name of a segment of the working day.
///
/// The four built-in segments have their own variants; any other name is a
/// segment added through the catalog. Names serialize as plain strings.
///
/// # Example
///
/// ```
/// use rota_engine::models::SegmentName;
///
/// let am: SegmentName = "AM".parse().unwrap();
/// assert_eq!(am, SegmentName::Am);
///
/// let late: SegmentName = "Late".parse().unwrap();
/// assert_eq!(late, SegmentName::Configured("Late".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SegmentName {
    /// Early segment before the morning block.
    Early,
    /// Morning block.
    Am,
    /// Lunch cover between the morning and afternoon blocks.
    Lunch,
    /// Afternoon block.
    Pm,
    /// A segment defined only by the catalog.
    Configured(String),
}

impl SegmentName {
    /// The built-in segments, in declaration order.
    pub const BUILT_IN: [SegmentName; 4] = [
        SegmentName::Early,
        SegmentName::Am,
        SegmentName::Lunch,
        SegmentName::Pm,
    ];

    /// Returns the canonical name used in configuration and export files.
    pub fn as_str(&self) -> &str {
        match self {
            SegmentName::Early => "Early",
            SegmentName::Am => "AM",
            SegmentName::Lunch => "Lunch",
            SegmentName::Pm => "PM",
            SegmentName::Configured(name) => name,
        }
    }

    /// The half of the day a built-in segment belongs to.
    ///
    /// Configured segments take theirs from the catalog.
    pub fn built_in_half(&self) -> Option<DayHalf> {
        match self {
            SegmentName::Early | SegmentName::Am => Some(DayHalf::Morning),
            SegmentName::Pm => Some(DayHalf::Afternoon),
            SegmentName::Lunch => Some(DayHalf::Either),
            SegmentName::Configured(_) => None,
        }
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SegmentName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidSegmentName {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed != s {
            return Err(invalid());
        }
        if let Some(built_in) = SegmentName::BUILT_IN
            .into_iter()
            .find(|segment| segment.as_str().eq_ignore_ascii_case(s))
        {
            // Built-in names are exact; "am" is a typo, not a new segment.
            return if built_in.as_str() == s {
                Ok(built_in)
            } else {
                Err(invalid())
            };
        }
        Ok(SegmentName::Configured(s.to_string()))
    }
}

impl TryFrom<String> for SegmentName {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SegmentName> for String {
    fn from(segment: SegmentName) -> Self {
        match segment {
            SegmentName::Configured(name) => name,
            built_in => built_in.as_str().to_string(),
        }
    }
}

/// Which half of the day a segment counts as for availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayHalf {
    /// Needs morning availability.
    Morning,
    /// Needs afternoon availability.
    Afternoon,
    /// Open to anyone working either half.
    Either,
}

/// A catalog entry: a segment's nominal window and ordering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDefinition {
    /// The segment this entry configures.
    pub name: SegmentName,
    /// Nominal start time.
    pub start: NaiveTime,
    /// Nominal end time.
    pub end: NaiveTime,
    /// Display and resolution order (ascending).
    pub order: u32,
    /// Availability half. Required for configured segments; built-in
    /// segments fall back to their fixed half.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<DayHalf>,
}

impl SegmentDefinition {
    /// The half of the day this segment counts as.
    pub fn half(&self) -> Option<DayHalf> {
        self.half.or_else(|| self.name.built_in_half())
    }
}

/// A resolved clock window for one segment on one person-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentWindow {
    /// Effective start time.
    pub start: NaiveTime,
    /// Effective end time.
    pub end: NaiveTime,
}

impl SegmentWindow {
    /// Creates a window from start and end times.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The nominal window of a catalog entry.
    pub fn nominal(definition: &SegmentDefinition) -> Self {
        Self::new(definition.start, definition.end)
    }

    /// Length of the window in minutes. Negative when the window is inverted.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Anchors the window to `date`, giving an absolute interval.
    ///
    /// # Example
    ///
    /// ```
    /// use rota_engine::models::SegmentWindow;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let window = SegmentWindow::new(
    ///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    /// );
    /// let interval = window.on(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
    /// assert_eq!(interval.duration_minutes(), 240);
    /// ```
    pub fn on(&self, date: NaiveDate) -> TimeInterval {
        TimeInterval::new(date.and_time(self.start), date.and_time(self.end))
    }
}
