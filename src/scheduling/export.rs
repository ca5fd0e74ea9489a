//! Export row materialization.
//!
//! Turns stored assignments into the shift rows handed to spreadsheet and
//! payroll exporters: one row per contiguous interval actually worked.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::config::RotaConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, ShiftRow, TimeInterval, WorkDay};
use crate::store::RecordStore;

use super::segment_times::{SegmentPresence, resolve_segment_windows};
use super::time_off::subtract_time_off;

/// Builds the export rows for every working day in `from..=to`.
///
/// For each person-day, the person's assignments decide which segments are
/// present, and so which adjustment rules shape the windows. Each
/// assignment's window then has the person's time off carved out of it,
/// and every remaining piece becomes a row.
///
/// # Arguments
///
/// * `store` - Source of assignments, people and time off
/// * `config` - Segment catalog, adjustment rules, roles and groups
/// * `from` - First date of the range (inclusive)
/// * `to` - Last date of the range (inclusive)
///
/// # Returns
///
/// Rows sorted by date, person and start time, or
/// [`EngineError::InvalidDateRange`] if `from` is after `to`. An assignment
/// whose window is entirely on time off produces no rows, and an assignment
/// whose segment is missing from the catalog is left out.
///
/// # Example
///
/// ```
/// use rota_engine::config::ConfigLoader;
/// use rota_engine::models::{Assignment, SegmentName};
/// use rota_engine::scheduling::shift_rows;
/// use rota_engine::store::{MemoryStore, RecordStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let mut store = MemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// store.upsert_assignments(vec![
///     Assignment::new(date, "p1", "role_front", SegmentName::Am),
///     Assignment::new(date, "p1", "role_phones", SegmentName::Lunch),
/// ]).unwrap();
///
/// let rows = shift_rows(&store, loader.config(), date, date).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].hours, Decimal::new(3, 0));
/// ```
pub fn shift_rows<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    from: NaiveDate,
    to: NaiveDate,
) -> EngineResult<Vec<ShiftRow>> {
    if from > to {
        return Err(EngineError::InvalidDateRange { from, to });
    }

    let mut rows = Vec::new();
    for date in from.iter_days().take_while(|day| *day <= to) {
        if WorkDay::from_date(date).is_none() {
            continue;
        }

        let mut by_person: BTreeMap<String, Vec<Assignment>> = BTreeMap::new();
        for assignment in store.assignments_on(date) {
            by_person
                .entry(assignment.person_id.clone())
                .or_default()
                .push(assignment);
        }

        for (person_id, assignments) in by_person {
            rows.extend(person_day_rows(store, config, date, &person_id, &assignments));
        }
    }

    rows.sort_by(|a, b| {
        (a.date, &a.person_id, a.start, &a.segment).cmp(&(b.date, &b.person_id, b.start, &b.segment))
    });
    info!(%from, %to, rows = rows.len(), "Materialized export rows");
    Ok(rows)
}

fn person_day_rows<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    date: NaiveDate,
    person_id: &str,
    assignments: &[Assignment],
) -> Vec<ShiftRow> {
    let presence = SegmentPresence::from_assignments(assignments);
    let windows = resolve_segment_windows(config, date, &presence);
    let offs: Vec<TimeInterval> = store
        .time_off_on(person_id, date)
        .iter()
        .map(|off| off.interval())
        .collect();
    let person_name = store
        .person(person_id)
        .map(|person| person.name)
        .unwrap_or_default();

    let mut rows = Vec::new();
    for assignment in assignments {
        let Some(window) = windows.interval(&assignment.segment) else {
            continue;
        };
        let role = config.role(&assignment.role_id);
        let group = config.group_for_role(&assignment.role_id);

        for piece in subtract_time_off(window, &offs) {
            rows.push(ShiftRow {
                assignment_id: assignment.id,
                person_id: person_id.to_string(),
                person_name: person_name.clone(),
                date,
                start: piece.start,
                end: piece.end,
                hours: piece.hours(),
                segment: assignment.segment.clone(),
                role_id: assignment.role_id.clone(),
                role_code: role.map(|role| role.code.clone()),
                group_id: role.map(|role| role.group_id.clone()),
                group_name: group.map(|group| group.name.clone()),
            });
        }
    }
    rows
}
