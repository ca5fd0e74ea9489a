//! HTTP request handlers for the rota API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{CandidateAssignment, Month, parse_date};
use crate::scheduling::{
    SegmentPresence, apply_monthly_defaults, availability_for, coverage_report,
    remove_assignment, resolve_segment_windows, schedule_assignment, shift_rows,
};
use crate::store::RecordStore;

use super::request::{AssignmentRequest, CoverageQuery, ExportQuery, WindowsQuery};
use super::response::{ApiError, ApiErrorResponse, ExportResponse, WindowsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/assignments", post(create_assignment_handler))
        .route("/assignments/:id", delete(delete_assignment_handler))
        .route("/months/:month/apply", post(apply_month_handler))
        .route("/windows", get(windows_handler))
        .route("/coverage", get(coverage_handler))
        .route("/export", get(export_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

fn bad_request(correlation_id: Uuid, error: ApiError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %error.code,
        error = %error.message,
        "Rejected request"
    );
    json_response(StatusCode::BAD_REQUEST, error)
}

fn json_rejection_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /assignments.
///
/// Checks the candidate and stores it. Blocked candidates get a 422 with
/// the reason.
async fn create_assignment_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assignment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(correlation_id, json_rejection_error(rejection)),
    };
    let candidate = match CandidateAssignment::try_from(request) {
        Ok(candidate) => candidate,
        Err(err) => return error_response(correlation_id, err),
    };

    let mut store = state.store().lock().await;
    match schedule_assignment(&mut *store, state.config().config(), candidate) {
        Ok(assignment) => {
            info!(
                correlation_id = %correlation_id,
                assignment_id = %assignment.id,
                "Assignment stored"
            );
            json_response(StatusCode::CREATED, assignment)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /assignments/:id.
async fn delete_assignment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return bad_request(
                correlation_id,
                ApiError::validation_error(format!("Invalid assignment id: {}", id)),
            );
        }
    };

    let mut store = state.store().lock().await;
    match remove_assignment(&mut *store, id) {
        Ok(_) => {
            info!(correlation_id = %correlation_id, assignment_id = %id, "Assignment deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /months/:month/apply.
///
/// Projects the month's templates into assignments in one batch.
async fn apply_month_handler(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, month = %month, "Processing projection request");

    let month: Month = match month.parse() {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let mut store = state.store().lock().await;
    match apply_monthly_defaults(&mut *store, state.config().config(), month) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                written = summary.written,
                duration_us = start_time.elapsed().as_micros(),
                "Projection completed successfully"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /windows.
///
/// Resolves the segment windows of one person-day from the person's stored
/// assignments.
async fn windows_handler(
    State(state): State<AppState>,
    query: Result<Query<WindowsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return bad_request(correlation_id, ApiError::validation_error(rejection.body_text()));
        }
    };
    let date = match parse_date(&query.date) {
        Ok(date) => date,
        Err(err) => return error_response(correlation_id, err),
    };

    let store = state.store().lock().await;
    let availability = match availability_for(&*store, &query.person_id, date) {
        Ok(availability) => availability,
        Err(err) => return error_response(correlation_id, err),
    };
    let presence =
        SegmentPresence::from_assignments(&store.assignments_for_person_on(&query.person_id, date));
    let resolved = resolve_segment_windows(state.config().config(), date, &presence);

    info!(
        correlation_id = %correlation_id,
        person_id = %query.person_id,
        date = %date,
        segments = resolved.windows.len(),
        "Resolved segment windows"
    );
    json_response(
        StatusCode::OK,
        WindowsResponse {
            person_id: query.person_id,
            date,
            availability,
            windows: resolved.windows,
        },
    )
}

/// Handler for GET /coverage.
async fn coverage_handler(
    State(state): State<AppState>,
    query: Result<Query<CoverageQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return bad_request(correlation_id, ApiError::validation_error(rejection.body_text()));
        }
    };
    let date = match parse_date(&query.date) {
        Ok(date) => date,
        Err(err) => return error_response(correlation_id, err),
    };

    let store = state.store().lock().await;
    let report = coverage_report(&*store, state.config().config(), date);
    info!(
        correlation_id = %correlation_id,
        date = %date,
        suggestions = report.suggestions.len(),
        "Coverage report built"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for GET /export.
async fn export_handler(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return bad_request(correlation_id, ApiError::validation_error(rejection.body_text()));
        }
    };
    let (from, to) = match query.range() {
        Ok(range) => range,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let store = state.store().lock().await;
    match shift_rows(&*store, state.config().config(), from, to) {
        Ok(rows) => {
            let response = ExportResponse::new(from, to, rows);
            info!(
                correlation_id = %correlation_id,
                rows = response.rows.len(),
                total_hours = %response.total_hours,
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Assignment, SegmentName};
    use crate::store::MemoryStore;
    use crate::test_support::{make_date, person};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        let mut store = MemoryStore::new();
        store.upsert_person(person("p1", "Ada")).unwrap();
        AppState::new(config, store)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assignments")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({ "date": "2026-01-14", "person_id": "p1", "segment": "AM" });

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assignments")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("role_id"));
    }

    #[tokio::test]
    async fn test_windows_for_stored_assignments() {
        let state = create_test_state();
        {
            let mut store = state.store().lock().await;
            let date = make_date("2026-01-14");
            store
                .upsert_assignments(vec![
                    Assignment::new(date, "p1", "role_front", SegmentName::Am),
                    Assignment::new(date, "p1", "role_phones", SegmentName::Lunch),
                ])
                .unwrap();
        }
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/windows?date=2026-01-14&person_id=p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["availability"], "B");
        assert_eq!(json["windows"]["AM"]["end"], "11:00:00");
        assert_eq!(json["windows"]["Lunch"]["start"], "11:00:00");
        assert!(json["windows"].get("PM").is_none());
    }

    #[tokio::test]
    async fn test_invalid_assignment_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/assignments/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
