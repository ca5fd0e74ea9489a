//! Scheduling resolution.
//!
//! This module contains the resolvers that turn catalogs, availability,
//! time off and templates into resolved segment windows, coverage, legality
//! decisions, projected assignments and export rows. Each resolver takes its
//! record store and configuration explicitly.

mod availability;
mod coverage;
mod export;
mod legality;
mod projection;
mod segment_times;
mod time_off;

pub use availability::{availability_for, availability_permits, segment_allowed};
pub use coverage::{
    Coverage, CoverageReport, CoverageStatus, GroupCoverage, RebalanceSuggestion, RoleCoverage,
    assigned_count, coverage_for, coverage_report, rebalance_suggestions, required_for,
};
pub use export::shift_rows;
pub use legality::{BlockReason, check_candidate, remove_assignment, schedule_assignment};
pub use projection::{ProjectionSummary, apply_monthly_defaults};
pub use segment_times::{DayWindows, SegmentPresence, resolve_segment_windows};
pub use time_off::{overlaps_time_off, subtract_time_off};
