//! Error types for the rota engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the resolvers, the configuration loader and
//! the record store can report.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::scheduling::BlockReason;

/// The main error type for the rota engine.
///
/// # Example
///
/// ```
/// use rota_engine::error::EngineError;
///
/// let error = EngineError::InvalidDate {
///     value: "2026-13-01".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid date: 2026-13-01");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is structurally inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A date key could not be parsed.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A month key could not be parsed.
    #[error("Invalid month: {value}")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// A segment name is blank or a misspelling of a built-in segment.
    #[error("Invalid segment name: '{value}'")]
    InvalidSegmentName {
        /// The rejected input.
        value: String,
    },

    /// A date range ends before it starts.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start.
        from: NaiveDate,
        /// Range end.
        to: NaiveDate,
    },

    /// A weekend date was passed where only working days are meaningful.
    #[error("{date} falls on a weekend")]
    WeekendDate {
        /// The weekend date.
        date: NaiveDate,
    },

    /// A candidate assignment was rejected.
    #[error("Assignment blocked: {reason}")]
    AssignmentBlocked {
        /// Why the assignment is not legal.
        reason: BlockReason,
    },

    /// No assignment exists with the given id.
    #[error("Assignment not found: {id}")]
    AssignmentNotFound {
        /// The id that was not found.
        id: Uuid,
    },

    /// A record failed validation at the store boundary.
    #[error("Invalid {entity} record: {message}")]
    InvalidRecord {
        /// The kind of record.
        entity: String,
        /// What made it invalid.
        message: String,
    },

    /// A store snapshot could not be read or parsed.
    #[error("Failed to load snapshot: {message}")]
    SnapshotParseError {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_record(entity: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidRecord {
            entity: entity.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
