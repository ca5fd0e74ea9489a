//! Exported shift rows.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::segment::SegmentName;

/// One contiguous worked interval, ready for export.
///
/// An assignment produces one row per sub-interval left after time off is
/// carved out of its window, and no rows at all when time off covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRow {
    /// The assignment this row was materialized from.
    pub assignment_id: Uuid,
    /// The person working.
    pub person_id: String,
    /// The person's display name, empty when the person record is missing.
    pub person_name: String,
    /// The working date.
    pub date: NaiveDate,
    /// Start of the worked interval.
    pub start: NaiveDateTime,
    /// End of the worked interval.
    pub end: NaiveDateTime,
    /// Hours in the interval.
    pub hours: Decimal,
    /// The segment the interval belongs to.
    pub segment: SegmentName,
    /// The role held.
    pub role_id: String,
    /// The role's short code, when the role is in the catalog.
    pub role_code: Option<String>,
    /// The role's group, when known.
    pub group_id: Option<String>,
    /// The group's display name, when known.
    pub group_name: Option<String>,
}
