//! Assignments and the monthly templates that generate them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::{Month, WorkDay};
use super::segment::SegmentName;

/// A person working a role in a segment on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier, stable across same-key overwrites.
    pub id: Uuid,
    /// The working date (never a weekend).
    pub date: NaiveDate,
    /// The person assigned.
    pub person_id: String,
    /// The role held.
    pub role_id: String,
    /// The segment worked.
    pub segment: SegmentName,
}

impl Assignment {
    /// Creates an assignment with a fresh id.
    pub fn new(
        date: NaiveDate,
        person_id: impl Into<String>,
        role_id: impl Into<String>,
        segment: SegmentName,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            person_id: person_id.into(),
            role_id: role_id.into(),
            segment,
        }
    }

    /// The key a person-day-segment is unique on.
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey {
            date: self.date,
            person_id: self.person_id.clone(),
            segment: self.segment.clone(),
        }
    }
}

/// Uniqueness key of an assignment: one role per person per segment per date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssignmentKey {
    /// The working date.
    pub date: NaiveDate,
    /// The person assigned.
    pub person_id: String,
    /// The segment worked.
    pub segment: SegmentName,
}

/// A proposed assignment that has not been checked or stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAssignment {
    /// The proposed date.
    pub date: NaiveDate,
    /// The person to assign.
    pub person_id: String,
    /// The role to hold.
    pub role_id: String,
    /// The segment to work.
    pub segment: SegmentName,
}

impl CandidateAssignment {
    /// Turns the candidate into an assignment with a fresh id.
    pub fn into_assignment(self) -> Assignment {
        Assignment::new(self.date, self.person_id, self.role_id, self.segment)
    }
}

/// "In this month, this person normally works this role in this segment."
///
/// Unique per (month, person, segment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDefault {
    /// The month the template covers.
    pub month: Month,
    /// The person the template is for.
    pub person_id: String,
    /// The segment worked.
    pub segment: SegmentName,
    /// The role normally held.
    pub role_id: String,
}

/// A weekday-specific role override of a [`MonthlyDefault`].
///
/// Unique per (month, person, weekday, segment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDefaultDay {
    /// The month the override covers.
    pub month: Month,
    /// The person the override is for.
    pub person_id: String,
    /// The weekday the override applies to.
    pub weekday: WorkDay,
    /// The segment worked.
    pub segment: SegmentName,
    /// The role held on that weekday.
    pub role_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assignments_get_distinct_ids() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let a = Assignment::new(date, "p1", "role_front", SegmentName::Am);
        let b = Assignment::new(date, "p1", "role_front", SegmentName::Am);
        assert_ne!(a.id, b.id);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_monthly_default_day_deserializes() {
        let json = r#"{
            "month": "2026-01",
            "person_id": "p1",
            "weekday": 3,
            "segment": "PM",
            "role_id": "role_phones"
        }"#;
        let day: MonthlyDefaultDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.weekday, WorkDay::Wed);
        assert_eq!(day.month.to_string(), "2026-01");
        assert_eq!(serde_json::to_value(&day).unwrap()["weekday"], 3);
    }

    #[test]
    fn test_monthly_default_day_rejects_weekend_slot() {
        let json = r#"{
            "month": "2026-01",
            "person_id": "p1",
            "weekday": 6,
            "segment": "AM",
            "role_id": "role_front"
        }"#;
        assert!(serde_json::from_str::<MonthlyDefaultDay>(json).is_err());
    }
}
