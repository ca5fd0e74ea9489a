//! Response types for the rota API.
//!
//! This module defines the success payloads that are not plain engine types,
//! the error body, and the mapping from engine errors to HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Availability, SegmentName, SegmentWindow, ShiftRow};

/// Body of `GET /windows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsResponse {
    /// The person resolved for.
    pub person_id: String,
    /// The date resolved for.
    pub date: NaiveDate,
    /// The person's effective availability that day.
    pub availability: Availability,
    /// Resolved window of each segment the person is assigned to.
    pub windows: BTreeMap<SegmentName, SegmentWindow>,
}

/// Body of `GET /export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// First date of the range.
    pub from: NaiveDate,
    /// Last date of the range.
    pub to: NaiveDate,
    /// Sum of `hours` over every row.
    pub total_hours: Decimal,
    /// The exported rows.
    pub rows: Vec<ShiftRow>,
}

impl ExportResponse {
    /// Wraps exported rows, totalling their hours.
    pub fn new(from: NaiveDate, to: NaiveDate, rows: Vec<ShiftRow>) -> Self {
        let total_hours = rows.iter().map(|row| row.hours).sum();
        Self {
            from,
            to,
            total_hours,
            rows,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::SnapshotParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("SNAPSHOT_ERROR", "Record store error", message),
            },
            EngineError::InvalidDate { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_DATE", message))
            }
            EngineError::InvalidMonth { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_MONTH", message))
            }
            EngineError::InvalidSegmentName { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_SEGMENT", message))
            }
            EngineError::InvalidDateRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_DATE_RANGE", message))
            }
            EngineError::WeekendDate { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "WEEKEND_DATE",
                    message,
                    "Only Monday to Friday dates are scheduled",
                ),
            ),
            EngineError::InvalidRecord { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_RECORD", message))
            }
            EngineError::AssignmentBlocked { reason } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("ASSIGNMENT_BLOCKED", message, reason.to_string()),
            },
            EngineError::AssignmentNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ASSIGNMENT_NOT_FOUND", message),
            },
        }
    }
}
