//! Record store access for the rota engine.
//!
//! The resolvers never reach for a global database handle. Every operation
//! takes a [`RecordStore`] explicitly, so each resolver can be exercised
//! against an isolated [`MemoryStore`].

mod memory;
mod snapshot;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Assignment, Availability, Month, MonthlyDefault, MonthlyDefaultDay, Person, SegmentName,
    TimeOff, WorkDay,
};

pub use memory::MemoryStore;
pub use snapshot::{Snapshot, load_snapshot};

/// Read/write row operations the engine needs from the record store.
///
/// The engine reads every entity type and writes only assignments.
pub trait RecordStore {
    /// Gets a person by id.
    fn person(&self, id: &str) -> Option<Person>;

    /// Gets every person, ordered by id.
    fn persons(&self) -> Vec<Person>;

    /// Gets the availability override for a person on an exact date.
    fn availability_override(&self, person_id: &str, date: NaiveDate) -> Option<Availability>;

    /// Gets every time-off record for a person.
    fn time_off_for(&self, person_id: &str) -> Vec<TimeOff>;

    /// Gets the standing requirement for (group, role, segment).
    fn needs_baseline(&self, group_id: &str, role_id: &str, segment: &SegmentName) -> Option<u32>;

    /// Gets the date-specific requirement for (date, group, role, segment).
    fn needs_override(
        &self,
        date: NaiveDate,
        group_id: &str,
        role_id: &str,
        segment: &SegmentName,
    ) -> Option<u32>;

    /// Gets every monthly default template for a month.
    fn monthly_defaults(&self, month: Month) -> Vec<MonthlyDefault>;

    /// Gets the weekday override of a monthly default, if any.
    fn monthly_default_day(
        &self,
        month: Month,
        person_id: &str,
        weekday: WorkDay,
        segment: &SegmentName,
    ) -> Option<MonthlyDefaultDay>;

    /// Gets every assignment on a date.
    fn assignments_on(&self, date: NaiveDate) -> Vec<Assignment>;

    /// Gets an assignment by id.
    fn assignment(&self, id: Uuid) -> Option<Assignment>;

    /// Writes a batch of assignments atomically.
    ///
    /// Rows are keyed by (date, person, segment). A row whose key already
    /// exists overwrites the stored role and keeps the stored id. Either the
    /// whole batch is written or, on error, nothing is.
    fn upsert_assignments(&mut self, batch: Vec<Assignment>) -> EngineResult<Vec<Assignment>>;

    /// Deletes an assignment, returning the removed row.
    fn delete_assignment(&mut self, id: Uuid) -> EngineResult<Assignment>;

    /// Gets a person's time-off records that touch `date`.
    fn time_off_on(&self, person_id: &str, date: NaiveDate) -> Vec<TimeOff> {
        self.time_off_for(person_id)
            .into_iter()
            .filter(|off| off.touches_date(date))
            .collect()
    }

    /// Gets a person's assignments on a date.
    fn assignments_for_person_on(&self, person_id: &str, date: NaiveDate) -> Vec<Assignment> {
        self.assignments_on(date)
            .into_iter()
            .filter(|assignment| assignment.person_id == person_id)
            .collect()
    }
}
