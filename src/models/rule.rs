//! Adjustment rules that move segment boundaries.

use serde::{Deserialize, Serialize};

use super::segment::{SegmentName, SegmentWindow};

/// One boundary of a segment window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryField {
    /// The start time.
    Start,
    /// The end time.
    End,
}

impl BoundaryField {
    /// Reads this boundary from a window.
    pub fn read(self, window: &SegmentWindow) -> chrono::NaiveTime {
        match self {
            BoundaryField::Start => window.start,
            BoundaryField::End => window.end,
        }
    }
}

/// The time an adjustment is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// The condition segment's current start.
    ConditionStart,
    /// The condition segment's current end.
    ConditionEnd,
    /// The target segment's current start.
    TargetStart,
    /// The target segment's current end.
    TargetEnd,
}

/// Shifts a target segment's boundary when a condition segment is present.
///
/// Rules fire for a person-day only if that person works the condition
/// segment (in `condition_role_id`, when set). Firing sets the target
/// boundary to the baseline time plus `offset_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    /// Application order; rules apply in ascending id.
    pub id: u32,
    /// Segment whose presence triggers the rule.
    pub condition_segment: SegmentName,
    /// Restricts the trigger to a specific role held in the condition segment.
    #[serde(default)]
    pub condition_role_id: Option<String>,
    /// Segment whose window is adjusted.
    pub target_segment: SegmentName,
    /// Which boundary of the target is written.
    pub target_field: BoundaryField,
    /// Time the offset is measured from.
    pub baseline: Baseline,
    /// Signed offset from the baseline.
    #[serde(default)]
    pub offset_minutes: i64,
}

impl AdjustmentRule {
    /// The segment and boundary the baseline is read from.
    pub fn baseline_source(&self) -> (&SegmentName, BoundaryField) {
        match self.baseline {
            Baseline::ConditionStart => (&self.condition_segment, BoundaryField::Start),
            Baseline::ConditionEnd => (&self.condition_segment, BoundaryField::End),
            Baseline::TargetStart => (&self.target_segment, BoundaryField::Start),
            Baseline::TargetEnd => (&self.target_segment, BoundaryField::End),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_deserializes_from_yaml() {
        let yaml = r#"
id: 20
condition_segment: Lunch
target_segment: PM
target_field: start
baseline: condition_end
offset_minutes: 60
"#;
        let rule: AdjustmentRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.id, 20);
        assert_eq!(rule.condition_role_id, None);
        assert_eq!(rule.target_field, BoundaryField::Start);
        assert_eq!(rule.baseline_source(), (&SegmentName::Lunch, BoundaryField::End));
    }

    #[test]
    fn test_baseline_source_for_target_fields() {
        let rule = AdjustmentRule {
            id: 1,
            condition_segment: SegmentName::Early,
            condition_role_id: Some("role_opening".to_string()),
            target_segment: SegmentName::Pm,
            target_field: BoundaryField::End,
            baseline: Baseline::TargetEnd,
            offset_minutes: -60,
        };
        assert_eq!(rule.baseline_source(), (&SegmentName::Pm, BoundaryField::End));
    }

    #[test]
    fn test_unknown_baseline_is_rejected() {
        let yaml = r#"
id: 1
condition_segment: Lunch
target_segment: AM
target_field: end
baseline: midnight
"#;
        assert!(serde_yaml::from_str::<AdjustmentRule>(yaml).is_err());
    }
}
