//! In-memory record store.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, AssignmentKey, Availability, AvailabilityOverride, Month, MonthlyDefault,
    MonthlyDefaultDay, NeedsBaseline, NeedsOverride, Person, SegmentName, TimeOff, WorkDay,
};

use super::RecordStore;

type NeedsBaselineKey = (String, String, SegmentName);
type NeedsOverrideKey = (NaiveDate, String, String, SegmentName);
type MonthlyDefaultKey = (Month, String, SegmentName);
type MonthlyDefaultDayKey = (Month, String, WorkDay, SegmentName);

/// A [`RecordStore`] held entirely in memory.
///
/// Every collection is keyed on its uniqueness constraint, so writing a
/// record with an existing key replaces the old one. Records are validated
/// as they enter the store.
///
/// # Example
///
/// ```
/// use rota_engine::models::{Assignment, SegmentName};
/// use rota_engine::store::{MemoryStore, RecordStore};
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// store
///     .upsert_assignments(vec![Assignment::new(date, "p1", "role_front", SegmentName::Am)])
///     .unwrap();
/// assert_eq!(store.assignments_on(date).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(super) persons: BTreeMap<String, Person>,
    pub(super) overrides: HashMap<(String, NaiveDate), Availability>,
    pub(super) time_off: Vec<TimeOff>,
    pub(super) needs_baselines: HashMap<NeedsBaselineKey, u32>,
    pub(super) needs_overrides: HashMap<NeedsOverrideKey, u32>,
    pub(super) monthly_defaults: BTreeMap<MonthlyDefaultKey, MonthlyDefault>,
    pub(super) monthly_default_days: BTreeMap<MonthlyDefaultDayKey, MonthlyDefaultDay>,
    pub(super) assignments: BTreeMap<AssignmentKey, Assignment>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a person.
    pub fn upsert_person(&mut self, person: Person) -> EngineResult<()> {
        require_id("person", "id", &person.id)?;
        self.persons.insert(person.id.clone(), person);
        Ok(())
    }

    /// Sets a date-specific availability override.
    pub fn set_availability_override(&mut self, record: AvailabilityOverride) -> EngineResult<()> {
        require_id("availability_override", "person_id", &record.person_id)?;
        require_work_day("availability_override", record.date)?;
        self.overrides
            .insert((record.person_id, record.date), record.avail);
        Ok(())
    }

    /// Adds a time-off record.
    pub fn add_time_off(&mut self, record: TimeOff) -> EngineResult<()> {
        require_id("time_off", "person_id", &record.person_id)?;
        if record.end < record.start {
            return Err(EngineError::invalid_record(
                "time_off",
                format!("end {} is before start {}", record.end, record.start),
            ));
        }
        self.time_off.push(record);
        Ok(())
    }

    /// Sets a standing requirement.
    pub fn set_needs_baseline(&mut self, record: NeedsBaseline) -> EngineResult<()> {
        require_id("needs_baseline", "group_id", &record.group_id)?;
        require_id("needs_baseline", "role_id", &record.role_id)?;
        self.needs_baselines.insert(
            (record.group_id, record.role_id, record.segment),
            record.required,
        );
        Ok(())
    }

    /// Sets a date-specific requirement.
    pub fn set_needs_override(&mut self, record: NeedsOverride) -> EngineResult<()> {
        require_id("needs_override", "group_id", &record.group_id)?;
        require_id("needs_override", "role_id", &record.role_id)?;
        require_work_day("needs_override", record.date)?;
        self.needs_overrides.insert(
            (record.date, record.group_id, record.role_id, record.segment),
            record.required,
        );
        Ok(())
    }

    /// Sets a monthly default template.
    pub fn set_monthly_default(&mut self, record: MonthlyDefault) -> EngineResult<()> {
        require_id("monthly_default", "person_id", &record.person_id)?;
        require_id("monthly_default", "role_id", &record.role_id)?;
        self.monthly_defaults.insert(
            (record.month, record.person_id.clone(), record.segment.clone()),
            record,
        );
        Ok(())
    }

    /// Sets a weekday override of a monthly default template.
    pub fn set_monthly_default_day(&mut self, record: MonthlyDefaultDay) -> EngineResult<()> {
        require_id("monthly_default_day", "person_id", &record.person_id)?;
        require_id("monthly_default_day", "role_id", &record.role_id)?;
        self.monthly_default_days.insert(
            (
                record.month,
                record.person_id.clone(),
                record.weekday,
                record.segment.clone(),
            ),
            record,
        );
        Ok(())
    }

    /// Every stored assignment in key order.
    pub fn all_assignments(&self) -> Vec<Assignment> {
        self.assignments.values().cloned().collect()
    }

    fn key_of(&self, id: Uuid) -> Option<AssignmentKey> {
        self.assignments
            .iter()
            .find(|(_, assignment)| assignment.id == id)
            .map(|(key, _)| key.clone())
    }
}

fn require_id(entity: &str, field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::invalid_record(
            entity,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

fn require_work_day(entity: &str, date: NaiveDate) -> EngineResult<()> {
    if WorkDay::from_date(date).is_none() {
        return Err(EngineError::invalid_record(
            entity,
            format!("{} falls on a weekend", date),
        ));
    }
    Ok(())
}

fn validate_assignment(assignment: &Assignment) -> EngineResult<()> {
    require_id("assignment", "person_id", &assignment.person_id)?;
    require_id("assignment", "role_id", &assignment.role_id)?;
    require_work_day("assignment", assignment.date)
}

impl RecordStore for MemoryStore {
    fn person(&self, id: &str) -> Option<Person> {
        self.persons.get(id).cloned()
    }

    fn persons(&self) -> Vec<Person> {
        self.persons.values().cloned().collect()
    }

    fn availability_override(&self, person_id: &str, date: NaiveDate) -> Option<Availability> {
        self.overrides.get(&(person_id.to_string(), date)).copied()
    }

    fn time_off_for(&self, person_id: &str) -> Vec<TimeOff> {
        self.time_off
            .iter()
            .filter(|off| off.person_id == person_id)
            .cloned()
            .collect()
    }

    fn needs_baseline(&self, group_id: &str, role_id: &str, segment: &SegmentName) -> Option<u32> {
        self.needs_baselines
            .get(&(group_id.to_string(), role_id.to_string(), segment.clone()))
            .copied()
    }

    fn needs_override(
        &self,
        date: NaiveDate,
        group_id: &str,
        role_id: &str,
        segment: &SegmentName,
    ) -> Option<u32> {
        self.needs_overrides
            .get(&(date, group_id.to_string(), role_id.to_string(), segment.clone()))
            .copied()
    }

    fn monthly_defaults(&self, month: Month) -> Vec<MonthlyDefault> {
        self.monthly_defaults
            .values()
            .filter(|template| template.month == month)
            .cloned()
            .collect()
    }

    fn monthly_default_day(
        &self,
        month: Month,
        person_id: &str,
        weekday: WorkDay,
        segment: &SegmentName,
    ) -> Option<MonthlyDefaultDay> {
        self.monthly_default_days
            .get(&(month, person_id.to_string(), weekday, segment.clone()))
            .cloned()
    }

    fn assignments_on(&self, date: NaiveDate) -> Vec<Assignment> {
        self.assignments
            .values()
            .filter(|assignment| assignment.date == date)
            .cloned()
            .collect()
    }

    fn assignment(&self, id: Uuid) -> Option<Assignment> {
        self.assignments
            .values()
            .find(|assignment| assignment.id == id)
            .cloned()
    }

    fn upsert_assignments(&mut self, batch: Vec<Assignment>) -> EngineResult<Vec<Assignment>> {
        // Validate the whole batch before touching the map.
        for assignment in &batch {
            validate_assignment(assignment)?;
        }

        let mut written = Vec::with_capacity(batch.len());
        for mut assignment in batch {
            let key = assignment.key();
            match self.assignments.get(&key) {
                Some(existing) => assignment.id = existing.id,
                None => {
                    // An id moving to a new key leaves its old slot.
                    if let Some(old_key) = self.key_of(assignment.id) {
                        self.assignments.remove(&old_key);
                    }
                }
            }
            self.assignments.insert(key, assignment.clone());
            written.push(assignment);
        }

        debug!(count = written.len(), "Upserted assignments");
        Ok(written)
    }

    fn delete_assignment(&mut self, id: Uuid) -> EngineResult<Assignment> {
        let key = self
            .key_of(id)
            .ok_or(EngineError::AssignmentNotFound { id })?;
        self.assignments
            .remove(&key)
            .ok_or(EngineError::AssignmentNotFound { id })
    }
}
