//! Segment time resolution.
//!
//! Turns the segment catalog's nominal windows into the effective windows a
//! specific person works on a specific day. Every present segment starts at
//! its nominal window; each adjustment rule whose condition holds for the
//! person-day then rewrites one boundary of its target segment.
//!
//! Rules apply as a fold in ascending id order. Each step consumes the map of
//! windows and yields the next one, so a rule that reads a boundary written
//! by an earlier rule sees the updated value. When two rules write the same
//! boundary, the later one wins.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::config::RotaConfig;
use crate::models::{
    AdjustmentRule, Assignment, BoundaryField, SegmentName, SegmentWindow, TimeInterval,
};

/// The segments a person works on one day, with the role held in each when known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPresence {
    segments: BTreeMap<SegmentName, Option<String>>,
}

impl SegmentPresence {
    /// An empty presence set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Presence of the given segments, with no role information.
    ///
    /// Role-restricted rules never fire for segments added this way.
    pub fn from_segments<I: IntoIterator<Item = SegmentName>>(segments: I) -> Self {
        Self {
            segments: segments.into_iter().map(|segment| (segment, None)).collect(),
        }
    }

    /// Presence built from a person's assignments on one day.
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        Self {
            segments: assignments
                .into_iter()
                .map(|assignment| (assignment.segment.clone(), Some(assignment.role_id.clone())))
                .collect(),
        }
    }

    /// Adds a segment, replacing any role previously recorded for it.
    pub fn insert(&mut self, segment: SegmentName, role_id: Option<String>) {
        self.segments.insert(segment, role_id);
    }

    /// Removes a segment.
    pub fn remove(&mut self, segment: &SegmentName) {
        self.segments.remove(segment);
    }

    /// Whether the person works `segment`.
    pub fn contains(&self, segment: &SegmentName) -> bool {
        self.segments.contains_key(segment)
    }

    /// The role held in `segment`, when known.
    pub fn role_in(&self, segment: &SegmentName) -> Option<&str> {
        self.segments.get(segment).and_then(|role| role.as_deref())
    }

    /// The present segments in name order.
    pub fn segments(&self) -> impl Iterator<Item = &SegmentName> + '_ {
        self.segments.keys()
    }

    /// Whether `rule` fires for this person-day.
    pub fn triggers(&self, rule: &AdjustmentRule) -> bool {
        if !self.contains(&rule.condition_segment) {
            return false;
        }
        match &rule.condition_role_id {
            None => true,
            Some(required) => self.role_in(&rule.condition_segment) == Some(required.as_str()),
        }
    }
}

/// Effective segment windows for one person on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayWindows {
    /// The date the windows apply to.
    pub date: NaiveDate,
    /// Resolved window of every present segment found in the catalog.
    pub windows: BTreeMap<SegmentName, SegmentWindow>,
}

impl DayWindows {
    /// The resolved window of a segment.
    ///
    /// Absent segments have no window that day.
    pub fn get(&self, segment: &SegmentName) -> Option<SegmentWindow> {
        self.windows.get(segment).copied()
    }

    /// The resolved window of a segment as an absolute interval on the date.
    pub fn interval(&self, segment: &SegmentName) -> Option<TimeInterval> {
        self.get(segment).map(|window| window.on(self.date))
    }
}

/// Resolves the effective window of every segment in `presence` on `date`.
///
/// Segments missing from the catalog are left out of the result. Rules
/// whose target (or baseline source) segment is not present are skipped.
///
/// # Example
///
/// ```
/// use rota_engine::config::ConfigLoader;
/// use rota_engine::models::SegmentName;
/// use rota_engine::scheduling::{SegmentPresence, resolve_segment_windows};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let presence = SegmentPresence::from_segments([SegmentName::Am, SegmentName::Lunch]);
///
/// let resolved = resolve_segment_windows(loader.config(), date, &presence);
/// let am = resolved.get(&SegmentName::Am).unwrap();
/// assert_eq!(am.end, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
/// ```
pub fn resolve_segment_windows(
    config: &RotaConfig,
    date: NaiveDate,
    presence: &SegmentPresence,
) -> DayWindows {
    let nominal: BTreeMap<SegmentName, SegmentWindow> = presence
        .segments()
        .filter_map(|segment| {
            config
                .segment(segment)
                .map(|definition| (segment.clone(), SegmentWindow::nominal(definition)))
        })
        .collect();

    let windows = config
        .rules()
        .iter()
        .filter(|rule| presence.triggers(rule))
        .fold(nominal, apply_rule);

    DayWindows { date, windows }
}

/// Applies one rule, producing the next map of windows.
fn apply_rule(
    windows: BTreeMap<SegmentName, SegmentWindow>,
    rule: &AdjustmentRule,
) -> BTreeMap<SegmentName, SegmentWindow> {
    let Some(target) = windows.get(&rule.target_segment).copied() else {
        debug!(rule_id = rule.id, target = %rule.target_segment, "Rule target not present, skipped");
        return windows;
    };

    let (source_segment, source_field) = rule.baseline_source();
    let Some(source) = windows.get(source_segment) else {
        debug!(rule_id = rule.id, source = %source_segment, "Rule baseline segment not resolved, skipped");
        return windows;
    };

    let baseline = source_field.read(source);
    let (value, _) = baseline.overflowing_add_signed(Duration::minutes(rule.offset_minutes));

    let adjusted = match rule.target_field {
        BoundaryField::Start => SegmentWindow::new(value, target.end),
        BoundaryField::End => SegmentWindow::new(target.start, value),
    };
    debug!(
        rule_id = rule.id,
        target = %rule.target_segment,
        start = %adjusted.start,
        end = %adjusted.end,
        "Applied adjustment rule"
    );

    let mut next = windows;
    next.insert(rule.target_segment.clone(), adjusted);
    next
}
