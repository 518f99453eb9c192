//! # REST API Interface Layer
//!
//! HTTP endpoints for categories, expenses, income, budgets and summaries.
//! Handlers translate between JSON and domain calls and carry no business
//! rules of their own.

pub mod budget_apis;
pub mod category_apis;
pub mod mappers;
pub mod summary_apis;
pub mod transaction_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{Local, NaiveDate};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::models::DateRange;
use crate::domain::validation::parse_optional_date;
use crate::error::{Result, TrackerError};

/// Status code for each error class
pub fn status_for(err: &TrackerError) -> StatusCode {
    match err {
        TrackerError::Validation(_) | TrackerError::CategoryNotFound(_) => StatusCode::BAD_REQUEST,
        TrackerError::NotFound { .. } => StatusCode::NOT_FOUND,
        TrackerError::Duplicate(_) => StatusCode::CONFLICT,
        TrackerError::Overflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error response for a failed operation.
///
/// Storage failures are logged with their cause and reported with a generic
/// message; client errors carry their own message.
pub fn error_response(err: &TrackerError, action: &str) -> Response {
    let status = status_for(err);
    let message = if err.is_client_error() {
        warn!("Failed to {}: {}", action, err);
        err.to_string()
    } else {
        error!("Failed to {}: {:?}", action, err);
        format!("Failed to {}", action)
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}

pub fn not_found_response(entity: &str, id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{} not found: {}", entity, id),
        }),
    )
        .into_response()
}

/// Inclusive range from optional `start`/`end` query values; a missing bound
/// falls back to the corresponding edge of [`DateRange::all_time`]
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let all_time = DateRange::all_time();
    let start = parse_optional_date(start)?.unwrap_or(all_time.start);
    let end = parse_optional_date(end)?.unwrap_or(all_time.end);
    if start > end {
        return Err(TrackerError::validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }
    Ok(DateRange::new(start, end))
}

/// The current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
