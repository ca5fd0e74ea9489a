//! Staffing requirements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::segment::SegmentName;

/// A standing headcount requirement, unique per (group, role, segment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedsBaseline {
    /// Group the requirement is reported under.
    pub group_id: String,
    /// Role required.
    pub role_id: String,
    /// Segment the requirement applies to.
    pub segment: SegmentName,
    /// Required headcount.
    pub required: u32,
}

/// A date-specific requirement, unique per (date, group, role, segment).
///
/// Authoritative over the baseline for its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedsOverride {
    /// Date the override applies to.
    pub date: NaiveDate,
    /// Group the requirement is reported under.
    pub group_id: String,
    /// Role required.
    pub role_id: String,
    /// Segment the requirement applies to.
    pub segment: SegmentName,
    /// Required headcount.
    pub required: u32,
}
