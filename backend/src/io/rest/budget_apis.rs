//! # REST API for Budget Management
//!
//! Endpoints for creating and maintaining budgets and for reading how much of
//! each budget has been spent.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{BudgetListResponse, BudgetStatusListResponse, CreateBudgetRequest, UpdateBudgetRequest};
use tracing::info;

use crate::domain::validation::parse_optional_date;
use crate::io::rest::mappers::BudgetMapper;
use crate::io::rest::{error_response, not_found_response, today};
use crate::AppState;

/// Create a router for budget related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/active", get(list_active_budgets))
        .route("/status", get(list_budget_statuses))
        .route("/:id", get(get_budget).put(update_budget).delete(delete_budget))
}

/// `today` overrides the current date, mostly for reproducible reports
#[derive(Deserialize, Debug, Default)]
pub struct BudgetDayQuery {
    pub today: Option<String>,
    #[serde(default)]
    pub active_only: bool,
}

pub async fn list_budgets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/budgets");

    match state.budget_service.list_budgets().await {
        Ok(budgets) => {
            let response = BudgetListResponse {
                budgets: BudgetMapper::to_dto_list(budgets),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e, "list budgets"),
    }
}

/// Budgets whose window contains today
pub async fn list_active_budgets(
    State(state): State<AppState>,
    Query(query): Query<BudgetDayQuery>,
) -> impl IntoResponse {
    info!("GET /api/budgets/active - query: {:?}", query);

    let day = match parse_optional_date(query.today.as_deref()) {
        Ok(day) => day.unwrap_or_else(today),
        Err(e) => return error_response(&e, "list active budgets"),
    };

    match state.budget_service.list_active_budgets(day).await {
        Ok(budgets) => {
            let response = BudgetListResponse {
                budgets: BudgetMapper::to_dto_list(budgets),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e, "list active budgets"),
    }
}

/// Spent, remaining, percentage and status for each budget
pub async fn list_budget_statuses(
    State(state): State<AppState>,
    Query(query): Query<BudgetDayQuery>,
) -> impl IntoResponse {
    info!("GET /api/budgets/status - query: {:?}", query);

    let day = match parse_optional_date(query.today.as_deref()) {
        Ok(day) => day.unwrap_or_else(today),
        Err(e) => return error_response(&e, "report budget status"),
    };

    match state.budget_service.budget_reports(day, query.active_only).await {
        Ok(reports) => {
            let response = BudgetStatusListResponse {
                statuses: reports.into_iter().map(BudgetMapper::to_status_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e, "report budget status"),
    }
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    info!("POST /api/budgets - request: {:?}", request);

    match state.budget_service.create_budget(request).await {
        Ok(budget) => (StatusCode::CREATED, Json(BudgetMapper::to_dto(budget))).into_response(),
        Err(e) => error_response(&e, "create budget"),
    }
}

pub async fn get_budget(State(state): State<AppState>, Path(budget_id): Path<i64>) -> impl IntoResponse {
    info!("GET /api/budgets/{}", budget_id);

    match state.budget_service.get_budget(budget_id).await {
        Ok(Some(budget)) => (StatusCode::OK, Json(BudgetMapper::to_dto(budget))).into_response(),
        Ok(None) => not_found_response("Budget", budget_id),
        Err(e) => error_response(&e, "get budget"),
    }
}

pub async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
    Json(request): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/budgets/{} - request: {:?}", budget_id, request);

    match state.budget_service.update_budget(budget_id, request).await {
        Ok(budget) => (StatusCode::OK, Json(BudgetMapper::to_dto(budget))).into_response(),
        Err(e) => error_response(&e, "update budget"),
    }
}

pub async fn delete_budget(State(state): State<AppState>, Path(budget_id): Path<i64>) -> impl IntoResponse {
    info!("DELETE /api/budgets/{}", budget_id);

    match state.budget_service.delete_budget(budget_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found_response("Budget", budget_id),
        Err(e) => error_response(&e, "delete budget"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::{BudgetPeriod, CategoryKind, CreateCategoryRequest};

    async fn setup_test_state() -> (AppState, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db);
        let groceries = state
            .category_service
            .create_category(CreateCategoryRequest {
                name: "Groceries".to_string(),
                kind: CategoryKind::Expense,
                color: None,
            })
            .await
            .unwrap();
        (state, groceries.id)
    }

    fn request(category_id: i64, amount: &str, start: &str) -> CreateBudgetRequest {
        CreateBudgetRequest {
            category_id,
            amount: amount.to_string(),
            period: BudgetPeriod::Monthly,
            start_date: start.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_budget_handler() {
        let (state, groceries) = setup_test_state().await;

        let response = create_budget(State(state.clone()), Json(request(groceries, "300", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);

        let response = create_budget(State(state), Json(request(groceries, "0", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_budget_crud_handlers() {
        let (state, groceries) = setup_test_state().await;
        let budget = state
            .budget_service
            .create_budget(request(groceries, "300", "2024-01-01"))
            .await
            .unwrap();

        let response = get_budget(State(state.clone()), Path(budget.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let response = update_budget(
            State(state.clone()),
            Path(budget.id),
            Json(request(groceries, "350", "2024-01-01")),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let response = delete_budget(State(state.clone()), Path(budget.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::NO_CONTENT);

        let response = get_budget(State(state), Path(budget.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_budget_status_handler_rejects_bad_day() {
        let (state, _) = setup_test_state().await;
        let query = BudgetDayQuery {
            today: Some("someday".to_string()),
            active_only: false,
        };
        let response = list_budget_statuses(State(state), Query(query)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
