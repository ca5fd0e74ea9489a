//! Monthly default projection.
//!
//! Expands each person's monthly role templates into concrete assignments on
//! every working day of the month. A weekday override replaces the template's
//! role for that weekday. Slots the person is unavailable for, or (outside
//! Early) on time off during, are skipped. Time off is checked against the
//! windows the person-day will actually have once stored, so skipping one
//! slot re-checks the others. Every surviving slot is written in one batch,
//! so a run either stores all of its rows or none.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::RotaConfig;
use crate::error::EngineResult;
use crate::models::{Assignment, Month, MonthlyDefault, SegmentName, WorkDay};
use crate::store::RecordStore;

use super::availability::{availability_for, availability_permits};
use super::legality::time_off_conflict;
use super::segment_times::SegmentPresence;

/// Counts from one projection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionSummary {
    /// The month projected.
    pub month: Option<Month>,
    /// Assignments written (new or overwritten).
    pub written: usize,
    /// Slots skipped because the person was unavailable.
    pub skipped_unavailable: usize,
    /// Slots skipped because of time off.
    pub skipped_time_off: usize,
    /// Slots skipped because the person is unknown or inactive.
    pub skipped_inactive: usize,
    /// Slots skipped because the role is unknown or not applicable to the segment.
    pub skipped_role: usize,
}

#[derive(Debug, Clone)]
struct PlannedSlot {
    segment: SegmentName,
    role_id: String,
}

/// Projects `month`'s monthly defaults into assignments.
///
/// Re-running with unchanged inputs rewrites the same rows with the same
/// ids, so the stored assignment set does not change.
///
/// # Example
///
/// ```
/// use rota_engine::config::ConfigLoader;
/// use rota_engine::models::{MonthlyDefault, Person, SegmentName, WeeklyAvailability};
/// use rota_engine::scheduling::apply_monthly_defaults;
/// use rota_engine::store::MemoryStore;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let mut store = MemoryStore::new();
/// store.upsert_person(Person {
///     id: "p1".to_string(),
///     name: "Ada".to_string(),
///     work_email: String::new(),
///     active: true,
///     weekly_availability: WeeklyAvailability::default(),
/// }).unwrap();
/// store.set_monthly_default(MonthlyDefault {
///     month: "2026-01".parse().unwrap(),
///     person_id: "p1".to_string(),
///     segment: SegmentName::Am,
///     role_id: "role_front".to_string(),
/// }).unwrap();
///
/// let summary =
///     apply_monthly_defaults(&mut store, loader.config(), "2026-01".parse().unwrap()).unwrap();
/// assert_eq!(summary.written, 22);
/// ```
pub fn apply_monthly_defaults<S: RecordStore + ?Sized>(
    store: &mut S,
    config: &RotaConfig,
    month: Month,
) -> EngineResult<ProjectionSummary> {
    let mut summary = ProjectionSummary {
        month: Some(month),
        ..ProjectionSummary::default()
    };

    let mut planned: BTreeMap<(NaiveDate, String), Vec<PlannedSlot>> = BTreeMap::new();
    for template in store.monthly_defaults(month) {
        plan_template(&*store, config, month, &template, &mut planned, &mut summary)?;
    }

    let mut batch = Vec::new();
    for ((date, person_id), slots) in &planned {
        let existing = store.assignments_for_person_on(person_id, *date);
        let kept = settle_time_off(
            &*store,
            config,
            person_id,
            *date,
            &existing,
            slots,
            &mut summary,
        );
        batch.extend(kept.into_iter().map(|slot| {
            Assignment::new(
                *date,
                person_id.clone(),
                slot.role_id.clone(),
                slot.segment.clone(),
            )
        }));
    }

    summary.written = store.upsert_assignments(batch)?.len();
    info!(
        %month,
        written = summary.written,
        skipped_unavailable = summary.skipped_unavailable,
        skipped_time_off = summary.skipped_time_off,
        skipped_inactive = summary.skipped_inactive,
        skipped_role = summary.skipped_role,
        "Applied monthly defaults"
    );
    Ok(summary)
}

/// Drops planned slots whose window overlaps time off until the survivors
/// are stable.
///
/// Windows depend on which segments are present: without Lunch, PM keeps its
/// nominal start. Each pass therefore re-resolves the remaining slots against
/// the existing assignments plus the slots still kept. Early never conflicts.
fn settle_time_off<'a, S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    person_id: &str,
    date: NaiveDate,
    existing: &[Assignment],
    slots: &'a [PlannedSlot],
    summary: &mut ProjectionSummary,
) -> Vec<&'a PlannedSlot> {
    let mut kept: Vec<&PlannedSlot> = slots.iter().collect();
    loop {
        let mut presence = SegmentPresence::from_assignments(existing);
        for slot in &kept {
            presence.insert(slot.segment.clone(), Some(slot.role_id.clone()));
        }

        let (clear, blocked): (Vec<&PlannedSlot>, Vec<&PlannedSlot>) =
            kept.into_iter().partition(|slot| {
                slot.segment == SegmentName::Early
                    || time_off_conflict(store, config, person_id, date, &slot.segment, &presence)
                        .is_none()
            });
        if blocked.is_empty() {
            return clear;
        }

        for slot in &blocked {
            debug!(%person_id, %date, segment = %slot.segment, "Skipped slot on time off");
        }
        summary.skipped_time_off += blocked.len();
        kept = clear;
    }
}

fn plan_template<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    month: Month,
    template: &MonthlyDefault,
    planned: &mut BTreeMap<(NaiveDate, String), Vec<PlannedSlot>>,
    summary: &mut ProjectionSummary,
) -> EngineResult<()> {
    let work_days: Vec<(NaiveDate, WorkDay)> = month.work_days().collect();

    let active = store
        .person(&template.person_id)
        .map(|person| person.active)
        .unwrap_or(false);
    if !active {
        debug!(person_id = %template.person_id, "Skipped template for unknown or inactive person");
        summary.skipped_inactive += work_days.len();
        return Ok(());
    }

    for (date, weekday) in work_days {
        let role_id = store
            .monthly_default_day(month, &template.person_id, weekday, &template.segment)
            .map(|day| day.role_id)
            .unwrap_or_else(|| template.role_id.clone());

        let applicable = config
            .role(&role_id)
            .map(|role| role.applies_to(&template.segment))
            .unwrap_or(false);
        if !applicable {
            debug!(%role_id, segment = %template.segment, %date, "Skipped slot with unusable role");
            summary.skipped_role += 1;
            continue;
        }

        let availability = availability_for(store, &template.person_id, date)?;
        if !availability_permits(config, availability, &template.segment) {
            summary.skipped_unavailable += 1;
            continue;
        }

        planned
            .entry((date, template.person_id.clone()))
            .or_default()
            .push(PlannedSlot {
                segment: template.segment.clone(),
                role_id,
            });
    }
    Ok(())
}
