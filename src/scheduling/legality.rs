//! Candidate assignment legality and direct scheduling.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RotaConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, Availability, CandidateAssignment, SegmentName, TimeInterval, WorkDay,
};
use crate::store::RecordStore;

use super::availability::{availability_for, availability_permits};
use super::segment_times::{SegmentPresence, resolve_segment_windows};
use super::time_off::overlaps_time_off;

/// Why a candidate assignment cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// The date is a Saturday or Sunday.
    #[error("{date} falls on a weekend")]
    WeekendDate {
        /// The weekend date.
        date: NaiveDate,
    },

    /// The person is not in the record store.
    #[error("person '{person_id}' does not exist")]
    UnknownPerson {
        /// The unknown id.
        person_id: String,
    },

    /// The person is marked inactive.
    #[error("person '{person_id}' is inactive")]
    InactivePerson {
        /// The inactive person.
        person_id: String,
    },

    /// The role is not in the catalog.
    #[error("role '{role_id}' does not exist")]
    UnknownRole {
        /// The unknown id.
        role_id: String,
    },

    /// The role does not list the segment as applicable.
    #[error("role '{role_id}' cannot be scheduled into {segment}")]
    SegmentNotApplicable {
        /// The role.
        role_id: String,
        /// The segment it does not apply to.
        segment: SegmentName,
    },

    /// The person's availability excludes the segment.
    #[error("person '{person_id}' is not available for {segment} on {date} ({availability:?})")]
    Unavailable {
        /// The person.
        person_id: String,
        /// The date.
        date: NaiveDate,
        /// The segment requested.
        segment: SegmentName,
        /// The person's effective availability that day.
        availability: Availability,
    },

    /// The segment window overlaps the person's time off.
    #[error("{segment} for person '{person_id}' overlaps time off from {off_start} to {off_end}")]
    TimeOffOverlap {
        /// The person.
        person_id: String,
        /// The segment requested.
        segment: SegmentName,
        /// Start of the overlapping time off.
        off_start: NaiveDateTime,
        /// End of the overlapping time off.
        off_end: NaiveDateTime,
    },
}

/// Returns the first reason `candidate` may not be scheduled, or `None`
/// when it is legal.
///
/// Checks run in order: weekend, person, role, role/segment applicability,
/// availability, then time off. The time-off check resolves the candidate's
/// segment window with the person's other assignments that day present, and
/// blocks on any overlap at all.
pub fn check_candidate<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    candidate: &CandidateAssignment,
) -> EngineResult<Option<BlockReason>> {
    let date = candidate.date;
    if WorkDay::from_date(date).is_none() {
        return Ok(Some(BlockReason::WeekendDate { date }));
    }

    let Some(person) = store.person(&candidate.person_id) else {
        return Ok(Some(BlockReason::UnknownPerson {
            person_id: candidate.person_id.clone(),
        }));
    };
    if !person.active {
        return Ok(Some(BlockReason::InactivePerson {
            person_id: person.id,
        }));
    }

    let Some(role) = config.role(&candidate.role_id) else {
        return Ok(Some(BlockReason::UnknownRole {
            role_id: candidate.role_id.clone(),
        }));
    };
    if !role.applies_to(&candidate.segment) {
        return Ok(Some(BlockReason::SegmentNotApplicable {
            role_id: role.id.clone(),
            segment: candidate.segment.clone(),
        }));
    }

    let availability = availability_for(store, &candidate.person_id, date)?;
    if !availability_permits(config, availability, &candidate.segment) {
        return Ok(Some(BlockReason::Unavailable {
            person_id: candidate.person_id.clone(),
            date,
            segment: candidate.segment.clone(),
            availability,
        }));
    }

    let mut presence =
        SegmentPresence::from_assignments(&store.assignments_for_person_on(&candidate.person_id, date));
    presence.insert(candidate.segment.clone(), Some(candidate.role_id.clone()));
    if let Some(off) = time_off_conflict(
        store,
        config,
        &candidate.person_id,
        date,
        &candidate.segment,
        &presence,
    ) {
        return Ok(Some(BlockReason::TimeOffOverlap {
            person_id: candidate.person_id.clone(),
            segment: candidate.segment.clone(),
            off_start: off.start,
            off_end: off.end,
        }));
    }

    Ok(None)
}

/// The first time-off interval that overlaps `segment`'s resolved window.
///
/// A segment missing from the catalog has no window and never conflicts.
pub(crate) fn time_off_conflict<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    person_id: &str,
    date: NaiveDate,
    segment: &SegmentName,
    presence: &SegmentPresence,
) -> Option<TimeInterval> {
    let offs: Vec<TimeInterval> = store
        .time_off_on(person_id, date)
        .iter()
        .map(|off| off.interval())
        .collect();
    if offs.is_empty() {
        return None;
    }

    let Some(window) = resolve_segment_windows(config, date, presence).interval(segment) else {
        debug!(%segment, "Segment missing from catalog, time-off check skipped");
        return None;
    };
    if !overlaps_time_off(&window, &offs) {
        return None;
    }
    offs.into_iter().find(|off| window.overlaps(off))
}

/// Checks `candidate` and stores it when legal.
///
/// An existing assignment for the same (date, person, segment) is
/// overwritten and keeps its id. Fails with
/// [`EngineError::AssignmentBlocked`] when the candidate is not legal.
///
/// # Example
///
/// ```
/// use rota_engine::config::ConfigLoader;
/// use rota_engine::models::{CandidateAssignment, Person, SegmentName, WeeklyAvailability};
/// use rota_engine::scheduling::schedule_assignment;
/// use rota_engine::store::MemoryStore;
/// use chrono::NaiveDate;
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
///
/// let candidate = CandidateAssignment {
///     date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     person_id: "p1".to_string(),
///     role_id: "role_front".to_string(),
///     segment: SegmentName::Am,
/// };
/// let assignment = schedule_assignment(&mut store, loader.config(), candidate).unwrap();
/// assert_eq!(assignment.role_id, "role_front");
/// ```
pub fn schedule_assignment<S: RecordStore + ?Sized>(
    store: &mut S,
    config: &RotaConfig,
    candidate: CandidateAssignment,
) -> EngineResult<Assignment> {
    if let Some(reason) = check_candidate(store, config, &candidate)? {
        warn!(
            person_id = %candidate.person_id,
            date = %candidate.date,
            segment = %candidate.segment,
            %reason,
            "Assignment blocked"
        );
        return Err(EngineError::AssignmentBlocked { reason });
    }

    let written = store.upsert_assignments(vec![candidate.into_assignment()])?;
    let assignment = written
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::invalid_record("assignment", "store wrote no rows"))?;
    info!(
        assignment_id = %assignment.id,
        person_id = %assignment.person_id,
        date = %assignment.date,
        segment = %assignment.segment,
        "Scheduled assignment"
    );
    Ok(assignment)
}

/// Deletes an assignment by id, returning the removed row.
pub fn remove_assignment<S: RecordStore + ?Sized>(
    store: &mut S,
    id: Uuid,
) -> EngineResult<Assignment> {
    let removed = store.delete_assignment(id)?;
    info!(assignment_id = %id, "Removed assignment");
    Ok(removed)
}
