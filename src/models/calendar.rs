//! Calendar primitives: working weekdays, month keys and date parsing.
//!
//! Weekends are excluded from every part of the rota, so the only weekday
//! type that appears in records is [`WorkDay`], which has no Saturday or
//! Sunday variant.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A working weekday, Monday through Friday.
///
/// Serialized as its 1-based number (Monday = 1). Deserializing also accepts
/// the short name (`"mon"` or `"Mon"`).
///
/// # Example
///
/// ```
/// use rota_engine::models::WorkDay;
/// use chrono::NaiveDate;
///
/// // 2026-01-14 is a Wednesday, 2026-01-17 a Saturday
/// let wednesday = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(WorkDay::from_date(wednesday), Some(WorkDay::Wed));
/// assert_eq!(WorkDay::from_date(saturday), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "WorkDayRepr", into = "u8")]
pub enum WorkDay {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
}

impl WorkDay {
    /// All working weekdays in calendar order.
    pub const ALL: [WorkDay; 5] = [
        WorkDay::Mon,
        WorkDay::Tue,
        WorkDay::Wed,
        WorkDay::Thu,
        WorkDay::Fri,
    ];

    /// Returns the working weekday of `date`, or `None` on a weekend.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        match date.weekday() {
            Weekday::Mon => Some(WorkDay::Mon),
            Weekday::Tue => Some(WorkDay::Tue),
            Weekday::Wed => Some(WorkDay::Wed),
            Weekday::Thu => Some(WorkDay::Thu),
            Weekday::Fri => Some(WorkDay::Fri),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// Returns the weekday from its 1-based number (Monday = 1).
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=5 => Some(Self::ALL[usize::from(number - 1)]),
            _ => None,
        }
    }

    /// Returns the 1-based weekday number (Monday = 1, Friday = 5).
    pub fn number(self) -> u8 {
        match self {
            WorkDay::Mon => 1,
            WorkDay::Tue => 2,
            WorkDay::Wed => 3,
            WorkDay::Thu => 4,
            WorkDay::Fri => 5,
        }
    }
}

impl fmt::Display for WorkDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkDay::Mon => "Mon",
            WorkDay::Tue => "Tue",
            WorkDay::Wed => "Wed",
            WorkDay::Thu => "Thu",
            WorkDay::Fri => "Fri",
        };
        f.write_str(name)
    }
}

/// Accepted wire forms of a [`WorkDay`].
#[derive(Deserialize)]
#[serde(untagged)]
enum WorkDayRepr {
    Number(u8),
    Name(String),
}

impl TryFrom<WorkDayRepr> for WorkDay {
    type Error = EngineError;

    fn try_from(repr: WorkDayRepr) -> EngineResult<Self> {
        match repr {
            WorkDayRepr::Number(number) => Self::from_number(number).ok_or_else(|| {
                EngineError::invalid_record(
                    "weekday",
                    format!("{} is not a working weekday number (1-5)", number),
                )
            }),
            WorkDayRepr::Name(name) => Self::ALL
                .into_iter()
                .find(|day| day.to_string().eq_ignore_ascii_case(&name))
                .ok_or_else(|| {
                    EngineError::invalid_record(
                        "weekday",
                        format!("'{}' is not a working weekday", name),
                    )
                }),
        }
    }
}

impl From<WorkDay> for u8 {
    fn from(day: WorkDay) -> Self {
        day.number()
    }
}

/// A calendar month key such as `2026-01`.
///
/// Serialized as its `YYYY-MM` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// Creates a month from a year and 1-based month number.
    ///
    /// Fails with [`EngineError::InvalidMonth`] when the month is out of range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| EngineError::InvalidMonth {
                value: format!("{:04}-{:02}", year, month),
            })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// The 1-based month number.
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// The first day of the month.
    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Whether `date` falls inside this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Every calendar day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first
            .iter_days()
            .take_while(move |day| self.contains(*day))
    }

    /// Every Monday-to-Friday date of the month, paired with its weekday.
    ///
    /// # Example
    ///
    /// ```
    /// use rota_engine::models::Month;
    ///
    /// let january: Month = "2026-01".parse().unwrap();
    /// assert_eq!(january.work_days().count(), 22);
    /// ```
    pub fn work_days(self) -> impl Iterator<Item = (NaiveDate, WorkDay)> {
        self.days()
            .filter_map(|day| WorkDay::from_date(day).map(|work_day| (day, work_day)))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Month {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Parses a `YYYY-MM-DD` date key.
///
/// Fails fast with [`EngineError::InvalidDate`]; callers never receive a
/// substituted default date.
///
/// # Example
///
/// ```
/// use rota_engine::models::parse_date;
///
/// assert!(parse_date("2026-01-14").is_ok());
/// assert!(parse_date("2026-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
    })
}
