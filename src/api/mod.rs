//! HTTP API module for the rota engine.
//!
//! This module provides the REST API endpoints for direct scheduling,
//! monthly projection, segment window lookup, coverage and export.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignmentRequest, CoverageQuery, ExportQuery, WindowsQuery};
pub use response::{ApiError, ApiErrorResponse, ExportResponse, WindowsResponse};
pub use state::AppState;
