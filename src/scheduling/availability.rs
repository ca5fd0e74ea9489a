//! Availability resolution.
//!
//! A date-specific override is authoritative for its date. Otherwise the
//! person's weekly default for the date's weekday applies. Whether an
//! availability admits a segment depends on the half of the day the catalog
//! places the segment in.

use chrono::NaiveDate;

use crate::config::RotaConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Availability, SegmentName, WorkDay};
use crate::store::RecordStore;

/// Returns a person's effective availability on `date`.
///
/// Weekend dates have no meaningful availability and fail with
/// [`EngineError::WeekendDate`]. A person missing from the store is
/// [`Availability::Unavailable`].
///
/// # Example
///
/// ```
/// use rota_engine::models::{Availability, AvailabilityOverride, Person, WeeklyAvailability};
/// use rota_engine::scheduling::availability_for;
/// use rota_engine::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::new();
/// store.upsert_person(Person {
///     id: "p1".to_string(),
///     name: "Ada".to_string(),
///     work_email: String::new(),
///     active: true,
///     weekly_availability: WeeklyAvailability::uniform(Availability::Both),
/// }).unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// store.set_availability_override(AvailabilityOverride {
///     person_id: "p1".to_string(),
///     date,
///     avail: Availability::MorningOnly,
/// }).unwrap();
///
/// assert_eq!(availability_for(&store, "p1", date).unwrap(), Availability::MorningOnly);
/// ```
pub fn availability_for<S: RecordStore + ?Sized>(
    store: &S,
    person_id: &str,
    date: NaiveDate,
) -> EngineResult<Availability> {
    let weekday = WorkDay::from_date(date).ok_or(EngineError::WeekendDate { date })?;

    if let Some(availability) = store.availability_override(person_id, date) {
        return Ok(availability);
    }

    Ok(store
        .person(person_id)
        .map(|person| person.weekly_availability.for_day(weekday))
        .unwrap_or(Availability::Unavailable))
}

/// Whether `availability` admits `segment`.
///
/// A segment with no known half (a configured name missing from the
/// catalog) admits nobody.
pub fn availability_permits(
    config: &RotaConfig,
    availability: Availability,
    segment: &SegmentName,
) -> bool {
    config
        .segment_half(segment)
        .is_some_and(|half| availability.permits(half))
}

/// Whether a person may work `segment` on `date`, going by availability alone.
pub fn segment_allowed<S: RecordStore + ?Sized>(
    store: &S,
    config: &RotaConfig,
    person_id: &str,
    date: NaiveDate,
    segment: &SegmentName,
) -> EngineResult<bool> {
    let availability = availability_for(store, person_id, date)?;
    Ok(availability_permits(config, availability, segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityOverride, WeeklyAvailability};
    use crate::store::MemoryStore;
    use crate::models::{DayHalf, SegmentDefinition};
    use crate::test_support::{make_date, person, standard_config, standard_segments, time};

    fn store_with_weekly(weekly: WeeklyAvailability) -> MemoryStore {
        let mut store = MemoryStore::new();
        let mut ada = person("p1", "Ada");
        ada.weekly_availability = weekly;
        store.upsert_person(ada).unwrap();
        store
    }

    #[test]
    fn test_weekly_default_by_weekday() {
        let weekly = WeeklyAvailability {
            mon: Availability::Both,
            tue: Availability::MorningOnly,
            wed: Availability::AfternoonOnly,
            thu: Availability::Unavailable,
            fri: Availability::Both,
        };
        let store = store_with_weekly(weekly);

        // 2026-01-12 is a Monday.
        let expected = [
            ("2026-01-12", Availability::Both),
            ("2026-01-13", Availability::MorningOnly),
            ("2026-01-14", Availability::AfternoonOnly),
            ("2026-01-15", Availability::Unavailable),
            ("2026-01-16", Availability::Both),
        ];
        for (date, availability) in expected {
            assert_eq!(
                availability_for(&store, "p1", make_date(date)).unwrap(),
                availability,
                "date {}",
                date
            );
        }
    }

    #[test]
    fn test_override_applies_to_exact_date_only() {
        let mut store = store_with_weekly(WeeklyAvailability::uniform(Availability::Both));
        store
            .set_availability_override(AvailabilityOverride {
                person_id: "p1".to_string(),
                date: make_date("2026-01-14"),
                avail: Availability::Unavailable,
            })
            .unwrap();

        assert_eq!(
            availability_for(&store, "p1", make_date("2026-01-14")).unwrap(),
            Availability::Unavailable
        );
        assert_eq!(
            availability_for(&store, "p1", make_date("2026-01-21")).unwrap(),
            Availability::Both
        );
    }

    #[test]
    fn test_weekend_date_is_an_error() {
        let store = store_with_weekly(WeeklyAvailability::default());
        match availability_for(&store, "p1", make_date("2026-01-17")) {
            Err(EngineError::WeekendDate { date }) => assert_eq!(date, make_date("2026-01-17")),
            other => panic!("expected WeekendDate, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_person_is_unavailable() {
        let store = MemoryStore::new();
        assert_eq!(
            availability_for(&store, "ghost", make_date("2026-01-14")).unwrap(),
            Availability::Unavailable
        );
    }

    #[test]
    fn test_segment_allowed_follows_eligibility() {
        let store = store_with_weekly(WeeklyAvailability::uniform(Availability::MorningOnly));
        let config = standard_config();
        let date = make_date("2026-01-14");
        assert!(segment_allowed(&store, &config, "p1", date, &SegmentName::Early).unwrap());
        assert!(segment_allowed(&store, &config, "p1", date, &SegmentName::Lunch).unwrap());
        assert!(!segment_allowed(&store, &config, "p1", date, &SegmentName::Pm).unwrap());
    }

    #[test]
    fn test_configured_segment_uses_catalog_half() {
        let late = SegmentName::Configured("Late".to_string());
        let mut segments = standard_segments();
        segments.push(SegmentDefinition {
            name: late.clone(),
            start: time(17, 0),
            end: time(20, 0),
            order: 4,
            half: Some(DayHalf::Afternoon),
        });
        let config = RotaConfig::new(segments, vec![], vec![], vec![]).unwrap();

        assert!(availability_permits(&config, Availability::AfternoonOnly, &late));
        assert!(!availability_permits(&config, Availability::MorningOnly, &late));

        let unlisted = SegmentName::Configured("Night".to_string());
        assert!(!availability_permits(&config, Availability::Both, &unlisted));
    }
}
