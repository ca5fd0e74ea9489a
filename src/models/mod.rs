//! Core data models for the rota engine.
//!
//! Every stored entity is an explicit record type. Availability codes, rule
//! baselines and weekdays are closed enumerations; segment names are the
//! built-in segments plus any the catalog adds.

mod assignment;
mod availability;
mod calendar;
mod interval;
mod needs;
mod organization;
mod rule;
mod segment;
mod shift_row;
mod time_off;

pub use assignment::{
    Assignment, AssignmentKey, CandidateAssignment, MonthlyDefault, MonthlyDefaultDay,
};
pub use availability::{Availability, AvailabilityOverride, WeeklyAvailability};
pub use calendar::{Month, WorkDay, parse_date};
pub use interval::TimeInterval;
pub use needs::{NeedsBaseline, NeedsOverride};
pub use organization::{Group, Person, Role};
pub use rule::{AdjustmentRule, Baseline, BoundaryField};
pub use segment::{DayHalf, SegmentDefinition, SegmentName, SegmentWindow};
pub use shift_row::ShiftRow;
pub use time_off::TimeOff;
