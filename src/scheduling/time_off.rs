//! Time-off interval algebra.
//!
//! Subtracts time-off intervals from a work window. The result is the set
//! of contiguous sub-intervals actually worked; it is independent of the
//! order the time-off intervals are given in.

use crate::models::TimeInterval;

/// Removes every overlapping portion of `offs` from `window`.
///
/// Each time-off interval splits the working pieces it overlaps into the
/// parts before and after it. Zero-length and inverted pieces are dropped at
/// the end, so a fully covered window yields an empty list.
///
/// # Example
///
/// ```
/// use rota_engine::models::TimeInterval;
/// use rota_engine::scheduling::subtract_time_off;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let window = TimeInterval::new(at(8, 0), at(12, 0));
/// let dentist = TimeInterval::new(at(9, 30), at(10, 30));
///
/// let worked = subtract_time_off(window, &[dentist]);
/// assert_eq!(worked, vec![
///     TimeInterval::new(at(8, 0), at(9, 30)),
///     TimeInterval::new(at(10, 30), at(12, 0)),
/// ]);
/// ```
pub fn subtract_time_off(window: TimeInterval, offs: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut remaining = offs.iter().fold(vec![window], |pieces, off| {
        pieces.iter().flat_map(|piece| piece.minus(off)).collect()
    });
    remaining.retain(|piece| !piece.is_empty());
    remaining.sort();
    remaining
}

/// Whether any time-off interval overlaps `window`.
pub fn overlaps_time_off(window: &TimeInterval, offs: &[TimeInterval]) -> bool {
    offs.iter().any(|off| window.overlaps(off))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn make_datetime(time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-01-14 {}", time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn interval(start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(make_datetime(start), make_datetime(end))
    }

    #[test]
    fn test_split_by_midmorning_appointment() {
        let worked = subtract_time_off(
            interval("08:00:00", "12:00:00"),
            &[interval("09:30:00", "10:30:00")],
        );
        assert_eq!(
            worked,
            vec![
                interval("08:00:00", "09:30:00"),
                interval("10:30:00", "12:00:00")
            ]
        );
    }

    #[test]
    fn test_full_consumption_yields_nothing() {
        let worked = subtract_time_off(
            interval("08:00:00", "12:00:00"),
            &[interval("07:00:00", "13:00:00")],
        );
        assert!(worked.is_empty());
    }

    #[test]
    fn test_exact_cover_yields_nothing() {
        let worked = subtract_time_off(
            interval("08:00:00", "12:00:00"),
            &[interval("08:00:00", "12:00:00")],
        );
        assert!(worked.is_empty());
    }

    #[test]
    fn test_one_window_split_by_several_offs() {
        let worked = subtract_time_off(
            interval("08:00:00", "12:00:00"),
            &[
                interval("10:30:00", "11:00:00"),
                interval("09:00:00", "09:15:00"),
            ],
        );
        assert_eq!(
            worked,
            vec![
                interval("08:00:00", "09:00:00"),
                interval("09:15:00", "10:30:00"),
                interval("11:00:00", "12:00:00"),
            ]
        );
    }

    #[test]
    fn test_touching_off_leaves_window_intact() {
        let window = interval("13:00:00", "17:00:00");
        let worked = subtract_time_off(window, &[interval("12:00:00", "13:00:00")]);
        assert_eq!(worked, vec![window]);
        assert!(!overlaps_time_off(&window, &[interval("12:00:00", "13:00:00")]));
    }

    #[test]
    fn test_no_offs_returns_window() {
        let window = interval("08:00:00", "12:00:00");
        assert_eq!(subtract_time_off(window, &[]), vec![window]);
        assert!(!overlaps_time_off(&window, &[]));
    }

    #[test]
    fn test_inverted_window_yields_nothing() {
        let inverted = interval("14:00:00", "13:00:00");
        assert!(subtract_time_off(inverted, &[]).is_empty());
    }

    #[test]
    fn test_multi_day_leave_overlaps_window() {
        let window = interval("08:00:00", "12:00:00");
        let leave = TimeInterval::new(
            make_datetime("00:00:00") - Duration::days(2),
            make_datetime("23:59:00") + Duration::days(1),
        );
        assert!(overlaps_time_off(&window, &[leave]));
        assert!(subtract_time_off(window, &[leave]).is_empty());
    }

    fn minutes_interval() -> impl Strategy<Value = TimeInterval> {
        (0i64..600, 0i64..240).prop_map(|(start, length)| {
            let base = NaiveDate::from_ymd_opt(2026, 1, 14)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap();
            TimeInterval::new(
                base + Duration::minutes(start),
                base + Duration::minutes(start + length),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_order_of_offs_does_not_matter(
            window in minutes_interval(),
            offs in prop::collection::vec(minutes_interval(), 0..6),
        ) {
            let mut reversed = offs.clone();
            reversed.reverse();
            prop_assert_eq!(
                subtract_time_off(window, &offs),
                subtract_time_off(window, &reversed)
            );
        }

        #[test]
        fn prop_pieces_stay_inside_window_and_avoid_offs(
            window in minutes_interval(),
            offs in prop::collection::vec(minutes_interval(), 0..6),
        ) {
            let pieces = subtract_time_off(window, &offs);
            for piece in &pieces {
                prop_assert!(!piece.is_empty());
                prop_assert!(window.start <= piece.start && piece.end <= window.end);
                prop_assert!(!overlaps_time_off(piece, &offs));
            }
            for pair in pieces.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        #[test]
        fn prop_worked_minutes_never_exceed_window(
            window in minutes_interval(),
            offs in prop::collection::vec(minutes_interval(), 0..6),
        ) {
            let worked: i64 = subtract_time_off(window, &offs)
                .iter()
                .map(TimeInterval::duration_minutes)
                .sum();
            prop_assert!(worked <= window.duration_minutes().max(0));
            if !overlaps_time_off(&window, &offs) && !window.is_empty() {
                prop_assert_eq!(worked, window.duration_minutes());
            }
        }
    }
}
