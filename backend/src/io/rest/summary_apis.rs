//! # REST API for Totals, Charts and Summaries
//!
//! Read-only aggregate endpoints. Every range defaults to all time when its
//! bounds are omitted.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{HealthResponse, TotalResponse, TransactionKind};
use tracing::info;

use crate::domain::summary_service::DEFAULT_TREND_MONTHS;
use crate::error::{Result, TrackerError};
use crate::io::rest::mappers::SummaryMapper;
use crate::io::rest::{error_response, parse_range, today};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/totals", get(get_total))
        .route("/category-totals", get(get_category_totals))
        .route("/chart-data", get(get_chart_data))
        .route("/summary", get(get_summary))
        .route("/monthly-data", get(get_monthly_data))
        .route("/analytics", get(get_analytics))
        .route("/health", get(health))
}

#[derive(Deserialize, Debug, Default)]
pub struct AggregateQuery {
    pub kind: Option<TransactionKind>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MonthlyQuery {
    pub months: Option<u32>,
    /// Last month of the trend, `YYYY-MM`; defaults to the current month
    pub until: Option<String>,
}

/// Sum of one kind (expense unless stated) over the range
pub async fn get_total(State(state): State<AppState>, Query(query): Query<AggregateQuery>) -> impl IntoResponse {
    info!("GET /api/totals - query: {:?}", query);

    let kind = query.kind.unwrap_or(TransactionKind::Expense);
    let range = match parse_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(&e, "compute total"),
    };

    match state.summary_service.total(kind, range, query.category_id).await {
        Ok(total) => {
            let response = TotalResponse {
                kind,
                start: range.start,
                end: range.end,
                category_id: query.category_id,
                total,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e, "compute total"),
    }
}

/// Positive per-category totals, largest first
pub async fn get_category_totals(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> impl IntoResponse {
    info!("GET /api/category-totals - query: {:?}", query);

    let kind = query.kind.unwrap_or(TransactionKind::Expense);
    let range = match parse_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(&e, "compute category totals"),
    };

    match state.summary_service.category_totals(kind, range).await {
        Ok(sums) => (StatusCode::OK, Json(SummaryMapper::to_category_totals_response(kind, sums))).into_response(),
        Err(e) => error_response(&e, "compute category totals"),
    }
}

/// Category totals as parallel `labels` and `values` arrays
pub async fn get_chart_data(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> impl IntoResponse {
    info!("GET /api/chart-data - query: {:?}", query);

    let kind = query.kind.unwrap_or(TransactionKind::Expense);
    let range = match parse_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(&e, "build chart data"),
    };

    match state.summary_service.category_totals(kind, range).await {
        Ok(sums) => (StatusCode::OK, Json(SummaryMapper::to_chart_data(sums))).into_response(),
        Err(e) => error_response(&e, "build chart data"),
    }
}

pub async fn get_summary(State(state): State<AppState>, Query(query): Query<AggregateQuery>) -> impl IntoResponse {
    info!("GET /api/summary - query: {:?}", query);

    let range = match parse_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(&e, "compute summary"),
    };

    match state.summary_service.summary(range).await {
        Ok(summary) => (StatusCode::OK, Json(SummaryMapper::to_summary_response(summary))).into_response(),
        Err(e) => error_response(&e, "compute summary"),
    }
}

/// Average expense, top expense category, health score and record count
pub async fn get_analytics(State(state): State<AppState>, Query(query): Query<AggregateQuery>) -> impl IntoResponse {
    info!("GET /api/analytics - query: {:?}", query);

    let range = match parse_range(query.start.as_deref(), query.end.as_deref()) {
        Ok(range) => range,
        Err(e) => return error_response(&e, "compute analytics"),
    };

    match state.summary_service.insights(range).await {
        Ok(insights) => (StatusCode::OK, Json(SummaryMapper::to_analytics_response(insights))).into_response(),
        Err(e) => error_response(&e, "compute analytics"),
    }
}

/// First day of a `YYYY-MM` month
fn parse_month(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map_err(|_| TrackerError::validation(format!("Invalid month: '{}' (expected YYYY-MM)", trimmed)))
}

pub async fn get_monthly_data(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> impl IntoResponse {
    info!("GET /api/monthly-data - query: {:?}", query);

    let until = match query.until.as_deref().map(str::trim) {
        None | Some("") => today(),
        Some(month) => match parse_month(month) {
            Ok(date) => date,
            Err(e) => return error_response(&e, "compute monthly data"),
        },
    };
    let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);

    match state.summary_service.monthly_trend(until, months).await {
        Ok(trend) => (StatusCode::OK, Json(SummaryMapper::to_monthly_data(trend))).into_response(),
        Err(e) => error_response(&e, "compute monthly data"),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
