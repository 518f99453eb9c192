//! # Budget Tracker Backend
//!
//! Personal finance tracking: expenses and income recorded against
//! categories, periodic budgets, and aggregate summaries, served as a JSON
//! HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (validation, services, budget status, filters)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! [`initialize_backend`] opens the database and builds the services once;
//! they are handed to every handler through [`AppState`].

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{BudgetService, CategoryService, SummaryService, TransactionService};
use crate::io::rest::{budget_apis, category_apis, summary_apis, transaction_apis};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub category_service: CategoryService<DbConnection>,
    pub transaction_service: TransactionService<DbConnection>,
    pub budget_service: BudgetService<DbConnection>,
    pub summary_service: SummaryService<DbConnection>,
}

impl AppState {
    pub fn new(connection: DbConnection) -> Self {
        let connection = Arc::new(connection);
        Self {
            category_service: CategoryService::new(connection.clone()),
            transaction_service: TransactionService::new(connection.clone()),
            budget_service: BudgetService::new(connection.clone()),
            summary_service: SummaryService::new(connection),
        }
    }
}

/// Open the database and build the application state
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let connection = DbConnection::new(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    info!("Setting up domain services");
    let app_state = AppState::new(connection);

    if config.seed_defaults {
        let inserted = app_state
            .category_service
            .seed_default_categories()
            .await
            .context("Failed to seed default categories")?;
        info!("Default categories ready ({} inserted)", inserted);
    }

    Ok(app_state)
}

/// Routes under `/api`, without middleware
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/categories", category_apis::router())
        .nest("/expenses", transaction_apis::expense_router())
        .nest("/income", transaction_apis::income_router())
        .nest("/transactions", transaction_apis::transactions_router())
        .nest("/budgets", budget_apis::router())
        .merge(summary_apis::router())
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", api_router());
    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use clap::Parser;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let config = AppConfig::parse_from(["budget-tracker"]);
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        create_router(AppState::new(db), &config).unwrap()
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_category(router: &Router, name: &str, kind: &str) -> i64 {
        let (status, body) = send(
            router,
            "POST",
            "/api/categories",
            Some(json!({ "name": name, "kind": kind, "color": null })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router().await;
        let (status, body) = send(&router, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_summary_and_chart_data_flow() {
        let router = test_router().await;
        let food = create_category(&router, "Food", "expense").await;
        let rent = create_category(&router, "Rent", "expense").await;
        let salary = create_category(&router, "Salary", "income").await;

        for (uri, category, amount, description, date) in [
            ("/api/expenses", food, "0.10", "Coffee", "2024-01-05"),
            ("/api/expenses", food, "0.20", "coffee again", "2024-01-06"),
            ("/api/expenses", rent, "900", "January rent", "2024-01-01"),
            ("/api/income", salary, "3000", "January pay", "2024-01-31"),
        ] {
            let (status, _) = send(
                &router,
                "POST",
                uri,
                Some(json!({
                    "category_id": category,
                    "amount": amount,
                    "description": description,
                    "date": date,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, summary) = send(&router, "GET", "/api/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["totalIncome"], json!(3000.0));
        assert_eq!(summary["totalExpenses"], json!(900.3));
        assert_eq!(summary["netBalance"], json!(2099.7));
        assert_eq!(summary["savingsRate"], json!(70.0));

        let (status, analytics) = send(&router, "GET", "/api/analytics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analytics["averageExpense"], json!(300.1));
        assert_eq!(analytics["topExpenseCategory"], json!("Rent"));
        assert_eq!(analytics["healthScore"], json!(100.0));
        assert_eq!(analytics["transactionCount"], json!(4));

        let (status, huge) = send(
            &router,
            "POST",
            "/api/expenses",
            Some(json!({
                "category_id": food,
                "amount": "79228162514264337593543950335",
                "description": "Too much",
                "date": "2024-01-07",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(huge["error"].as_str().unwrap().contains("cannot exceed"));
        let (_, summary_after) = send(&router, "GET", "/api/summary", None).await;
        assert_eq!(summary_after["totalExpenses"], json!(900.3));

        let (status, chart) = send(&router, "GET", "/api/chart-data?kind=expense", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(chart["labels"], json!(["Rent", "Food"]));
        assert_eq!(chart["values"], json!([900.0, 0.3]));

        let (status, found) = send(
            &router,
            "GET",
            "/api/transactions?search=coffee&dateFrom=2024-01-01&dateTo=2024-01-31&type=",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["count"], json!(2));
        assert_eq!(found["transactions"][0]["description"], "coffee again");
    }

    #[tokio::test]
    async fn test_budget_status_flow() {
        let router = test_router().await;
        let groceries = create_category(&router, "Groceries", "expense").await;

        let (status, budget) = send(
            &router,
            "POST",
            "/api/budgets",
            Some(json!({
                "category_id": groceries,
                "amount": "200",
                "period": "monthly",
                "start_date": "2024-01-15",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(budget["end_date"], "2024-02-14");

        send(
            &router,
            "POST",
            "/api/expenses",
            Some(json!({
                "category_id": groceries,
                "amount": "180",
                "description": "Big shop",
                "date": "2024-01-20",
            })),
        )
        .await;

        let (status, report) = send(&router, "GET", "/api/budgets/status?today=2024-02-01", None).await;
        assert_eq!(status, StatusCode::OK);
        let first = &report["statuses"][0];
        assert_eq!(first["status"], "Over Budget");
        assert_eq!(first["percentage"], json!(90.0));
        assert_eq!(first["remaining_days"], json!(14));
        assert_eq!(first["active"], json!(true));
    }

    #[tokio::test]
    async fn test_error_responses() {
        let router = test_router().await;
        create_category(&router, "Food", "expense").await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/categories",
            Some(json!({ "name": "Food", "kind": "expense", "color": null })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("Food"));

        let (status, _) = send(
            &router,
            "POST",
            "/api/expenses",
            Some(json!({
                "category_id": 42,
                "amount": "10",
                "description": "Orphan",
                "date": "2024-01-01",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, "DELETE", "/api/budgets/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_monthly_data() {
        let router = test_router().await;
        let (status, body) = send(&router, "GET", "/api/monthly-data?months=3&until=2024-03", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["months"], json!(["2024-01", "2024-02", "2024-03"]));
        assert_eq!(body["income"], json!([0.0, 0.0, 0.0]));
    }
}
