//! JSON snapshots of the operational records.
//!
//! A snapshot is how rows arrive from the external record store. Each row
//! passes through the same validating inserters as direct writes, and a
//! snapshot that repeats a uniqueness key is rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, AvailabilityOverride, MonthlyDefault, MonthlyDefaultDay, NeedsBaseline,
    NeedsOverride, Person, TimeOff,
};

use super::RecordStore;
use super::memory::MemoryStore;

/// Every operational record, as plain lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// People.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Date-specific availability overrides.
    #[serde(default)]
    pub availability_overrides: Vec<AvailabilityOverride>,
    /// Time-off records.
    #[serde(default)]
    pub time_off: Vec<TimeOff>,
    /// Standing requirements.
    #[serde(default)]
    pub needs_baselines: Vec<NeedsBaseline>,
    /// Date-specific requirements.
    #[serde(default)]
    pub needs_overrides: Vec<NeedsOverride>,
    /// Monthly templates.
    #[serde(default)]
    pub monthly_defaults: Vec<MonthlyDefault>,
    /// Weekday overrides of monthly templates.
    #[serde(default)]
    pub monthly_default_days: Vec<MonthlyDefaultDay>,
    /// Concrete assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl MemoryStore {
    /// Builds a store from a snapshot, validating every record.
    pub fn from_snapshot(snapshot: Snapshot) -> EngineResult<Self> {
        let mut store = MemoryStore::new();

        let person_count = snapshot.persons.len();
        for person in snapshot.persons {
            store.upsert_person(person)?;
        }
        ensure_unique("person", person_count, store.persons.len())?;

        let override_count = snapshot.availability_overrides.len();
        for record in snapshot.availability_overrides {
            store.set_availability_override(record)?;
        }
        ensure_unique("availability_override", override_count, store.overrides.len())?;

        for record in snapshot.time_off {
            store.add_time_off(record)?;
        }

        let baseline_count = snapshot.needs_baselines.len();
        for record in snapshot.needs_baselines {
            store.set_needs_baseline(record)?;
        }
        ensure_unique("needs_baseline", baseline_count, store.needs_baselines.len())?;

        let override_count = snapshot.needs_overrides.len();
        for record in snapshot.needs_overrides {
            store.set_needs_override(record)?;
        }
        ensure_unique("needs_override", override_count, store.needs_overrides.len())?;

        let default_count = snapshot.monthly_defaults.len();
        for record in snapshot.monthly_defaults {
            store.set_monthly_default(record)?;
        }
        ensure_unique("monthly_default", default_count, store.monthly_defaults.len())?;

        let day_count = snapshot.monthly_default_days.len();
        for record in snapshot.monthly_default_days {
            store.set_monthly_default_day(record)?;
        }
        ensure_unique(
            "monthly_default_day",
            day_count,
            store.monthly_default_days.len(),
        )?;

        let assignment_count = snapshot.assignments.len();
        store.upsert_assignments(snapshot.assignments)?;
        ensure_unique("assignment", assignment_count, store.assignments.len())?;

        Ok(store)
    }

    /// Captures the store's records as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            persons: self.persons.values().cloned().collect(),
            availability_overrides: self
                .overrides
                .iter()
                .map(|((person_id, date), avail)| AvailabilityOverride {
                    person_id: person_id.clone(),
                    date: *date,
                    avail: *avail,
                })
                .collect(),
            time_off: self.time_off.clone(),
            needs_baselines: self
                .needs_baselines
                .iter()
                .map(|((group_id, role_id, segment), required)| NeedsBaseline {
                    group_id: group_id.clone(),
                    role_id: role_id.clone(),
                    segment: segment.clone(),
                    required: *required,
                })
                .collect(),
            needs_overrides: self
                .needs_overrides
                .iter()
                .map(|((date, group_id, role_id, segment), required)| NeedsOverride {
                    date: *date,
                    group_id: group_id.clone(),
                    role_id: role_id.clone(),
                    segment: segment.clone(),
                    required: *required,
                })
                .collect(),
            monthly_defaults: self.monthly_defaults.values().cloned().collect(),
            monthly_default_days: self.monthly_default_days.values().cloned().collect(),
            assignments: self.all_assignments(),
        }
    }
}

fn ensure_unique(entity: &str, given: usize, stored: usize) -> EngineResult<()> {
    if stored < given {
        return Err(EngineError::invalid_record(
            entity,
            format!("{} records share a uniqueness key", given - stored + 1),
        ));
    }
    Ok(())
}

/// Loads a JSON snapshot file into a [`MemoryStore`].
///
/// # Example
///
/// ```no_run
/// use rota_engine::store::{RecordStore, load_snapshot};
///
/// let store = load_snapshot("./rota.json")?;
/// println!("{} people", store.persons().len());
/// # Ok::<(), rota_engine::error::EngineError>(())
/// ```
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> EngineResult<MemoryStore> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| EngineError::SnapshotParseError {
        message: format!("{}: {}", path.display(), e),
    })?;
    let snapshot: Snapshot =
        serde_json::from_str(&content).map_err(|e| EngineError::SnapshotParseError {
            message: format!("{}: {}", path.display(), e),
        })?;
    let store = MemoryStore::from_snapshot(snapshot)?;
    info!(
        path = %path.display(),
        persons = store.persons().len(),
        assignments = store.assignments.len(),
        "Loaded record store snapshot"
    );
    Ok(store)
}
