//! Coverage need resolution.
//!
//! Required headcount comes from a date-specific needs override when one
//! exists, otherwise from the standing baseline, otherwise zero. Assigned
//! headcount counts assignments for the (date, role, segment).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::RotaConfig;
use crate::models::{Role, SegmentName, WorkDay};
use crate::store::RecordStore;

/// How assigned headcount compares to required headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Fewer assigned than required.
    Understaffed,
    /// Exactly as many assigned as required.
    Met,
    /// More assigned than required.
    Overstaffed,
}

/// Required versus assigned headcount for one (date, group, role, segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Required headcount.
    pub required: u32,
    /// Assigned headcount.
    pub assigned: u32,
    /// Comparison of the two.
    pub status: CoverageStatus,
}

impl Coverage {
    /// Builds a coverage entry, deriving its status.
    pub fn new(required: u32, assigned: u32) -> Self {
        let status = match assigned.cmp(&required) {
            Ordering::Less => CoverageStatus::Understaffed,
            Ordering::Equal => CoverageStatus::Met,
            Ordering::Greater => CoverageStatus::Overstaffed,
        };
        Self {
            required,
            assigned,
            status,
        }
    }
}

/// Coverage of one role in one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCoverage {
    /// The role.
    pub role_id: String,
    /// The role's short code.
    pub role_code: String,
    /// The segment.
    pub segment: SegmentName,
    /// Required versus assigned.
    #[serde(flatten)]
    pub coverage: Coverage,
}

/// Coverage of every role in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCoverage {
    /// The group id.
    pub group_id: String,
    /// The group's display name, if the group is in the catalog.
    pub group_name: Option<String>,
    /// One entry per role and applicable segment.
    pub entries: Vec<RoleCoverage>,
}

/// An offer to move a surplus assignee into an understaffed role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebalanceSuggestion {
    /// The person who could move.
    pub person_id: String,
    /// The segment both roles are in.
    pub segment: SegmentName,
    /// The overstaffed role the person holds now.
    pub from_role_id: String,
    /// The understaffed role the person could take.
    pub to_role_id: String,
}

/// Coverage of every configured role on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// The date reported on.
    pub date: NaiveDate,
    /// Per-group coverage, ordered by group id.
    pub groups: Vec<GroupCoverage>,
    /// Moves that would relieve understaffing.
    pub suggestions: Vec<RebalanceSuggestion>,
}

/// Required headcount for (date, group, role, segment).
///
/// Weekend dates never require anyone.
///
/// # Example
///
/// ```
/// use rota_engine::models::{NeedsBaseline, NeedsOverride, SegmentName};
/// use rota_engine::scheduling::required_for;
/// use rota_engine::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// store.set_needs_baseline(NeedsBaseline {
///     group_id: "grp_front".to_string(),
///     role_id: "role_front".to_string(),
///     segment: SegmentName::Am,
///     required: 2,
/// }).unwrap();
/// store.set_needs_override(NeedsOverride {
///     date,
///     group_id: "grp_front".to_string(),
///     role_id: "role_front".to_string(),
///     segment: SegmentName::Am,
///     required: 4,
/// }).unwrap();
///
/// assert_eq!(required_for(&store, date, "grp_front", "role_front", &SegmentName::Am), 4);
/// ```
pub fn required_for<S: RecordStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    group_id: &str,
    role_id: &str,
    segment: &SegmentName,
) -> u32 {
    if WorkDay::from_date(date).is_none() {
        return 0;
    }
    store
        .needs_override(date, group_id, role_id, segment)
        .or_else(|| store.needs_baseline(group_id, role_id, segment))
        .unwrap_or(0)
}

/// Number of assignments for (date, role, segment).
pub fn assigned_count<S: RecordStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    role_id: &str,
    segment: &SegmentName,
) -> u32 {
    let count = store
        .assignments_on(date)
        .iter()
        .filter(|assignment| assignment.role_id == role_id && assignment.segment == *segment)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Required versus assigned headcount for (date, group, role, segment).
pub fn coverage_for<S: RecordStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    group_id: &str,
    role_id: &str,
    segment: &SegmentName,
) -> Coverage {
    Coverage::new(
        required_for(store, date, group_id, role_id, segment),
        assigned_count(store, date, role_id, segment),
    )
}

/// Coverage of every role and applicable segment on `date`, grouped by group.
///
/// Weekend dates produce an empty report.
pub fn coverage_report<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    date: NaiveDate,
) -> CoverageReport {
    if WorkDay::from_date(date).is_none() {
        return CoverageReport {
            date,
            groups: Vec::new(),
            suggestions: Vec::new(),
        };
    }

    let mut groups: Vec<GroupCoverage> = Vec::new();
    for role in config.roles() {
        let entries = ordered_segments(config, role).into_iter().map(|segment| {
            let coverage = coverage_for(store, date, &role.group_id, &role.id, &segment);
            RoleCoverage {
                role_id: role.id.clone(),
                role_code: role.code.clone(),
                segment,
                coverage,
            }
        });

        match groups.iter_mut().find(|group| group.group_id == role.group_id) {
            Some(group) => group.entries.extend(entries),
            None => groups.push(GroupCoverage {
                group_id: role.group_id.clone(),
                group_name: config.group(&role.group_id).map(|group| group.name.clone()),
                entries: entries.collect(),
            }),
        }
    }
    groups.sort_by(|a, b| a.group_id.cmp(&b.group_id));

    let suggestions = rebalance_suggestions(store, &groups, date);
    debug!(%date, groups = groups.len(), suggestions = suggestions.len(), "Built coverage report");

    CoverageReport {
        date,
        groups,
        suggestions,
    }
}

/// Pairs surplus assignees of overstaffed roles with understaffed roles in
/// the same segment.
///
/// Surplus people are taken in person id order. Each understaffed role keeps
/// a count of the heads it still lacks and is offered no more than that.
pub fn rebalance_suggestions<S: RecordStore + ?Sized>(
    store: &S,
    groups: &[GroupCoverage],
    date: NaiveDate,
) -> Vec<RebalanceSuggestion> {
    let entries: Vec<&RoleCoverage> = groups.iter().flat_map(|group| &group.entries).collect();
    let assignments = store.assignments_on(date);
    let mut suggestions = Vec::new();

    let segments: BTreeSet<&SegmentName> = entries.iter().map(|entry| &entry.segment).collect();
    for segment in segments {
        // (role id, heads still lacking)
        let mut openings: Vec<(&str, u32)> = entries
            .iter()
            .filter(|entry| entry.segment == *segment)
            .filter(|entry| entry.coverage.status == CoverageStatus::Understaffed)
            .map(|entry| {
                (
                    entry.role_id.as_str(),
                    entry.coverage.required - entry.coverage.assigned,
                )
            })
            .collect();
        if openings.is_empty() {
            continue;
        }

        for entry in entries
            .iter()
            .filter(|entry| entry.segment == *segment)
            .filter(|entry| entry.coverage.status == CoverageStatus::Overstaffed)
        {
            let surplus = (entry.coverage.assigned - entry.coverage.required) as usize;
            let mut holders: Vec<&str> = assignments
                .iter()
                .filter(|assignment| {
                    assignment.segment == *segment && assignment.role_id == entry.role_id
                })
                .map(|assignment| assignment.person_id.as_str())
                .collect();
            holders.sort();

            for person_id in holders.into_iter().take(surplus) {
                let Some(opening) = openings.iter_mut().find(|(_, lacking)| *lacking > 0) else {
                    break;
                };
                opening.1 -= 1;
                suggestions.push(RebalanceSuggestion {
                    person_id: person_id.to_string(),
                    segment: segment.clone(),
                    from_role_id: entry.role_id.clone(),
                    to_role_id: opening.0.to_string(),
                });
            }
        }
    }

    suggestions
}

fn ordered_segments(config: &RotaConfig, role: &Role) -> Vec<SegmentName> {
    let mut segments: Vec<SegmentName> = role.applicable_segments.iter().cloned().collect();
    segments.sort_by_key(|segment| {
        (
            config
                .segment(segment)
                .map(|definition| definition.order)
                .unwrap_or(u32::MAX),
            segment.clone(),
        )
    });
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, NeedsBaseline, NeedsOverride};
    use crate::store::MemoryStore;
    use crate::test_support::{make_date, standard_config};

    fn baseline(role_id: &str, group_id: &str, segment: SegmentName, required: u32) -> NeedsBaseline {
        NeedsBaseline {
            group_id: group_id.to_string(),
            role_id: role_id.to_string(),
            segment,
            required,
        }
    }

    fn assign(store: &mut MemoryStore, date: NaiveDate, person: &str, role: &str, segment: SegmentName) {
        store
            .upsert_assignments(vec![Assignment::new(date, person, role, segment)])
            .unwrap();
    }

    #[test]
    fn test_override_takes_precedence_over_baseline() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        store
            .set_needs_baseline(baseline("role_front", "grp_front", SegmentName::Am, 2))
            .unwrap();
        store
            .set_needs_override(NeedsOverride {
                date,
                group_id: "grp_front".to_string(),
                role_id: "role_front".to_string(),
                segment: SegmentName::Am,
                required: 0,
            })
            .unwrap();

        assert_eq!(
            required_for(&store, date, "grp_front", "role_front", &SegmentName::Am),
            0
        );
        assert_eq!(
            required_for(
                &store,
                make_date("2026-01-15"),
                "grp_front",
                "role_front",
                &SegmentName::Am
            ),
            2
        );
    }

    #[test]
    fn test_missing_needs_default_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(
            required_for(
                &store,
                make_date("2026-01-14"),
                "grp_front",
                "role_front",
                &SegmentName::Pm
            ),
            0
        );
    }

    #[test]
    fn test_weekend_requires_nobody() {
        let mut store = MemoryStore::new();
        store
            .set_needs_baseline(baseline("role_front", "grp_front", SegmentName::Am, 2))
            .unwrap();
        assert_eq!(
            required_for(
                &store,
                make_date("2026-01-17"),
                "grp_front",
                "role_front",
                &SegmentName::Am
            ),
            0
        );
        let report = coverage_report(&store, &standard_config(), make_date("2026-01-17"));
        assert!(report.groups.is_empty());
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(Coverage::new(2, 1).status, CoverageStatus::Understaffed);
        assert_eq!(Coverage::new(2, 2).status, CoverageStatus::Met);
        assert_eq!(Coverage::new(2, 3).status, CoverageStatus::Overstaffed);
        assert_eq!(Coverage::new(0, 0).status, CoverageStatus::Met);
    }

    #[test]
    fn test_assigned_count_matches_role_and_segment() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        assign(&mut store, date, "p1", "role_front", SegmentName::Am);
        assign(&mut store, date, "p2", "role_front", SegmentName::Am);
        assign(&mut store, date, "p3", "role_front", SegmentName::Pm);
        assign(&mut store, date, "p4", "role_phones", SegmentName::Am);
        assign(&mut store, make_date("2026-01-15"), "p1", "role_front", SegmentName::Am);

        assert_eq!(assigned_count(&store, date, "role_front", &SegmentName::Am), 2);
        let coverage = coverage_for(&store, date, "grp_front", "role_front", &SegmentName::Am);
        assert_eq!(coverage.status, CoverageStatus::Overstaffed);
    }

    #[test]
    fn test_report_groups_roles_by_group() {
        let store = MemoryStore::new();
        let report = coverage_report(&store, &standard_config(), make_date("2026-01-14"));

        let group_ids: Vec<&str> = report.groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(group_ids, vec!["grp_facilities", "grp_front"]);

        let front = &report.groups[1];
        assert_eq!(front.group_name.as_deref(), Some("Front Office"));
        // Two roles with three applicable segments each.
        assert_eq!(front.entries.len(), 6);
        assert_eq!(front.entries[0].segment, SegmentName::Am);
        assert_eq!(front.entries[1].segment, SegmentName::Lunch);

        let facilities = &report.groups[0];
        let opening: Vec<_> = facilities
            .entries
            .iter()
            .filter(|entry| entry.role_id == "role_opening")
            .collect();
        assert_eq!(opening.len(), 1);
        assert_eq!(opening[0].segment, SegmentName::Early);
    }

    #[test]
    fn test_rebalance_moves_surplus_into_understaffed_role() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        store
            .set_needs_baseline(baseline("role_front", "grp_front", SegmentName::Am, 1))
            .unwrap();
        store
            .set_needs_baseline(baseline("role_phones", "grp_front", SegmentName::Am, 1))
            .unwrap();
        assign(&mut store, date, "p2", "role_front", SegmentName::Am);
        assign(&mut store, date, "p1", "role_front", SegmentName::Am);
        assign(&mut store, date, "p3", "role_front", SegmentName::Am);

        let report = coverage_report(&store, &standard_config(), date);

        assert_eq!(
            report.suggestions,
            vec![RebalanceSuggestion {
                person_id: "p1".to_string(),
                segment: SegmentName::Am,
                from_role_id: "role_front".to_string(),
                to_role_id: "role_phones".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_suggestions_across_segments() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        store
            .set_needs_baseline(baseline("role_phones", "grp_front", SegmentName::Pm, 1))
            .unwrap();
        assign(&mut store, date, "p1", "role_front", SegmentName::Am);

        let report = coverage_report(&store, &standard_config(), date);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_rebalance_with_huge_deficit_stays_bounded() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        store
            .set_needs_override(NeedsOverride {
                date,
                group_id: "grp_front".to_string(),
                role_id: "role_phones".to_string(),
                segment: SegmentName::Am,
                required: u32::MAX,
            })
            .unwrap();
        assign(&mut store, date, "p1", "role_front", SegmentName::Am);
        assign(&mut store, date, "p2", "role_front", SegmentName::Am);

        let report = coverage_report(&store, &standard_config(), date);

        let moved: Vec<&str> = report
            .suggestions
            .iter()
            .map(|s| s.person_id.as_str())
            .collect();
        assert_eq!(moved, vec!["p1", "p2"]);
        assert!(report.suggestions.iter().all(|s| s.to_role_id == "role_phones"));
    }

    #[test]
    fn test_rebalance_offers_each_role_only_what_it_lacks() {
        let mut store = MemoryStore::new();
        let date = make_date("2026-01-14");
        store
            .set_needs_baseline(baseline("role_phones", "grp_front", SegmentName::Pm, 1))
            .unwrap();
        for person in ["p1", "p2", "p3"] {
            assign(&mut store, date, person, "role_front", SegmentName::Pm);
        }

        let report = coverage_report(&store, &standard_config(), date);

        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].person_id, "p1");
        assert_eq!(report.suggestions[0].segment, SegmentName::Pm);
    }
}
