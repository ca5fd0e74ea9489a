//! Availability codes and per-person availability records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::WorkDay;
use super::segment::DayHalf;

/// Which half-days a person can work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Not available.
    #[serde(rename = "U")]
    Unavailable,
    /// Morning segments only.
    #[serde(rename = "AM")]
    MorningOnly,
    /// Afternoon segments only.
    #[serde(rename = "PM")]
    AfternoonOnly,
    /// Morning and afternoon.
    #[serde(rename = "B")]
    Both,
}

impl Availability {
    /// Whether a person with this availability may work a segment in `half`.
    ///
    /// Morning segments need morning availability, afternoon segments need
    /// afternoon availability, and segments open to either half (such as
    /// Lunch) take anyone working either half-day.
    ///
    /// # Example
    ///
    /// ```
    /// use rota_engine::models::{Availability, DayHalf};
    ///
    /// assert!(Availability::MorningOnly.permits(DayHalf::Either));
    /// assert!(!Availability::MorningOnly.permits(DayHalf::Afternoon));
    /// assert!(!Availability::Unavailable.permits(DayHalf::Either));
    /// ```
    pub fn permits(self, half: DayHalf) -> bool {
        match half {
            DayHalf::Morning => matches!(self, Availability::MorningOnly | Availability::Both),
            DayHalf::Afternoon => matches!(self, Availability::AfternoonOnly | Availability::Both),
            DayHalf::Either => self != Availability::Unavailable,
        }
    }
}

/// Default availability for each working weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    /// Monday.
    pub mon: Availability,
    /// Tuesday.
    pub tue: Availability,
    /// Wednesday.
    pub wed: Availability,
    /// Thursday.
    pub thu: Availability,
    /// Friday.
    pub fri: Availability,
}

impl WeeklyAvailability {
    /// The same availability on every weekday.
    pub fn uniform(availability: Availability) -> Self {
        Self {
            mon: availability,
            tue: availability,
            wed: availability,
            thu: availability,
            fri: availability,
        }
    }

    /// The default for one weekday.
    pub fn for_day(&self, day: WorkDay) -> Availability {
        match day {
            WorkDay::Mon => self.mon,
            WorkDay::Tue => self.tue,
            WorkDay::Wed => self.wed,
            WorkDay::Thu => self.thu,
            WorkDay::Fri => self.fri,
        }
    }
}

impl Default for WeeklyAvailability {
    fn default() -> Self {
        Self::uniform(Availability::Both)
    }
}

/// A date-specific availability that supersedes the weekly default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityOverride {
    /// The person the override applies to.
    pub person_id: String,
    /// The exact date overridden.
    pub date: NaiveDate,
    /// Availability on that date.
    pub avail: Availability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_day_eligibility_table() {
        use super::Availability::*;
        use super::DayHalf::*;

        let cases = [
            (Unavailable, [false, false, false]),
            (MorningOnly, [true, false, true]),
            (AfternoonOnly, [false, true, true]),
            (Both, [true, true, true]),
        ];

        for (availability, expected) in cases {
            let actual = [Morning, Afternoon, Either].map(|half| availability.permits(half));
            assert_eq!(actual, expected, "availability {:?}", availability);
        }
    }

    #[test]
    fn test_availability_codes_round_trip_as_letters() {
        let json = r#"["U","AM","PM","B"]"#;
        let parsed: Vec<Availability> = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            vec![
                Availability::Unavailable,
                Availability::MorningOnly,
                Availability::AfternoonOnly,
                Availability::Both
            ]
        );
        assert!(serde_json::from_str::<Availability>("\"X\"").is_err());
    }

    #[test]
    fn test_weekly_for_day() {
        let weekly = WeeklyAvailability {
            mon: Availability::Both,
            tue: Availability::MorningOnly,
            wed: Availability::Unavailable,
            thu: Availability::AfternoonOnly,
            fri: Availability::Both,
        };
        assert_eq!(weekly.for_day(WorkDay::Tue), Availability::MorningOnly);
        assert_eq!(weekly.for_day(WorkDay::Wed), Availability::Unavailable);
        assert_eq!(weekly.for_day(WorkDay::Thu), Availability::AfternoonOnly);
    }
}
