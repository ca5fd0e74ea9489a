//! Request types for the rota API.
//!
//! Dates and months arrive as strings and are parsed explicitly, so a
//! malformed key is reported as an invalid date rather than a generic body
//! error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CandidateAssignment, SegmentName, parse_date};

/// Request body for `POST /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The working date (`YYYY-MM-DD`).
    pub date: String,
    /// The person to assign.
    pub person_id: String,
    /// The role to hold.
    pub role_id: String,
    /// The segment to work.
    pub segment: SegmentName,
}

impl TryFrom<AssignmentRequest> for CandidateAssignment {
    type Error = EngineError;

    fn try_from(req: AssignmentRequest) -> EngineResult<Self> {
        Ok(CandidateAssignment {
            date: parse_date(&req.date)?,
            person_id: req.person_id,
            role_id: req.role_id,
            segment: req.segment,
        })
    }
}

/// Query string for `GET /windows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsQuery {
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The person whose windows to resolve.
    pub person_id: String,
}

/// Query string for `GET /coverage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageQuery {
    /// The date (`YYYY-MM-DD`).
    pub date: String,
}

/// Query string for `GET /export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuery {
    /// First date of the range, inclusive.
    pub from: String,
    /// Last date of the range, inclusive.
    pub to: String,
}

impl ExportQuery {
    /// Parses both ends of the range.
    pub fn range(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        Ok((parse_date(&self.from)?, parse_date(&self.to)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_request_deserialization() {
        let json = r#"{
            "date": "2026-01-14",
            "person_id": "p1",
            "role_id": "role_front",
            "segment": "AM"
        }"#;

        let request: AssignmentRequest = serde_json::from_str(json).unwrap();
        let candidate = CandidateAssignment::try_from(request).unwrap();

        assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
        assert_eq!(candidate.segment, SegmentName::Am);
    }

    #[test]
    fn test_malformed_date_is_invalid_date() {
        let request = AssignmentRequest {
            date: "14/01/2026".to_string(),
            person_id: "p1".to_string(),
            role_id: "role_front".to_string(),
            segment: SegmentName::Am,
        };
        match CandidateAssignment::try_from(request) {
            Err(EngineError::InvalidDate { value }) => assert_eq!(value, "14/01/2026"),
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_misspelt_segment_fails_to_deserialize() {
        let json = r#"{"date": "2026-01-14", "person_id": "p1", "role_id": "r", "segment": "am"}"#;
        assert!(serde_json::from_str::<AssignmentRequest>(json).is_err());
    }

    #[test]
    fn test_configured_segment_deserializes() {
        let json = r#"{"date": "2026-01-14", "person_id": "p1", "role_id": "r", "segment": "Night"}"#;
        let req: AssignmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.segment, SegmentName::Configured("Night".to_string()));
    }

    #[test]
    fn test_export_range_parses_both_ends() {
        let query = ExportQuery {
            from: "2026-01-01".to_string(),
            to: "2026-01-31".to_string(),
        };
        let (from, to) = query.range().unwrap();
        assert!(from < to);

        let bad = ExportQuery {
            from: "2026-01-01".to_string(),
            to: "end".to_string(),
        };
        assert!(matches!(bad.range(), Err(EngineError::InvalidDate { .. })));
    }
}
