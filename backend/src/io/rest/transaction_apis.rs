//! # REST API for Expenses and Income
//!
//! `/api/expenses` and `/api/income` expose the same operations over their
//! own ledgers; `/api/transactions` lists both with the combined filter.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{CreateTransactionRequest, TransactionKind, UpdateTransactionRequest};
use tracing::info;

use crate::domain::transaction_filter::TransactionFilter;
use crate::error::{Result, TrackerError};
use crate::io::rest::mappers::TransactionMapper;
use crate::io::rest::{error_response, not_found_response, parse_range};
use crate::AppState;

pub fn expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", get(get_expense).put(update_expense).delete(delete_expense))
}

pub fn income_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_income).post(create_income))
        .route("/:id", get(get_income).put(update_income).delete(delete_income))
}

pub fn transactions_router() -> Router<AppState> {
    Router::new().route("/", get(search_transactions))
}

/// Query parameters for the per-kind list endpoints
#[derive(Deserialize, Debug, Default)]
pub struct LedgerQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub category_id: Option<i64>,
}

/// Query parameters for `GET /api/transactions`; the camelCase date names
/// used by the transactions page are accepted as aliases
#[derive(Deserialize, Debug, Default)]
pub struct TransactionSearchQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(alias = "dateTo")]
    pub date_to: Option<String>,
}

fn entity_name(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "Expense",
        TransactionKind::Income => "Income",
    }
}

fn path_for(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "/api/expenses",
        TransactionKind::Income => "/api/income",
    }
}

async fn list_ledger(state: AppState, kind: TransactionKind, query: LedgerQuery) -> Response {
    info!("GET {} - query: {:?}", path_for(kind), query);

    let range = if query.start.is_none() && query.end.is_none() {
        None
    } else {
        match parse_range(query.start.as_deref(), query.end.as_deref()) {
            Ok(range) => Some(range),
            Err(e) => return error_response(&e, "list transactions"),
        }
    };

    match state
        .transaction_service
        .list_transactions(kind, range, query.category_id)
        .await
    {
        Ok(transactions) => (StatusCode::OK, Json(TransactionMapper::to_list_response(transactions))).into_response(),
        Err(e) => error_response(&e, "list transactions"),
    }
}

async fn create_entry(state: AppState, kind: TransactionKind, request: CreateTransactionRequest) -> Response {
    info!("POST {} - request: {:?}", path_for(kind), request);

    match state.transaction_service.create_transaction(kind, request).await {
        Ok(transaction) => (StatusCode::CREATED, Json(TransactionMapper::to_dto(transaction))).into_response(),
        Err(e) => error_response(&e, &format!("create {}", kind)),
    }
}

async fn get_entry(state: AppState, kind: TransactionKind, transaction_id: i64) -> Response {
    info!("GET {}/{}", path_for(kind), transaction_id);

    match state.transaction_service.get_transaction(kind, transaction_id).await {
        Ok(Some(transaction)) => (StatusCode::OK, Json(TransactionMapper::to_dto(transaction))).into_response(),
        Ok(None) => not_found_response(entity_name(kind), transaction_id),
        Err(e) => error_response(&e, &format!("get {}", kind)),
    }
}

async fn update_entry(
    state: AppState,
    kind: TransactionKind,
    transaction_id: i64,
    request: UpdateTransactionRequest,
) -> Response {
    info!("PUT {}/{} - request: {:?}", path_for(kind), transaction_id, request);

    match state
        .transaction_service
        .update_transaction(kind, transaction_id, request)
        .await
    {
        Ok(transaction) => (StatusCode::OK, Json(TransactionMapper::to_dto(transaction))).into_response(),
        Err(e) => error_response(&e, &format!("update {}", kind)),
    }
}

async fn delete_entry(state: AppState, kind: TransactionKind, transaction_id: i64) -> Response {
    info!("DELETE {}/{}", path_for(kind), transaction_id);

    match state.transaction_service.delete_transaction(kind, transaction_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found_response(entity_name(kind), transaction_id),
        Err(e) => error_response(&e, &format!("delete {}", kind)),
    }
}

pub async fn list_expenses(State(state): State<AppState>, Query(query): Query<LedgerQuery>) -> impl IntoResponse {
    list_ledger(state, TransactionKind::Expense, query).await
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    create_entry(state, TransactionKind::Expense, request).await
}

pub async fn get_expense(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    get_entry(state, TransactionKind::Expense, id).await
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    update_entry(state, TransactionKind::Expense, id, request).await
}

pub async fn delete_expense(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    delete_entry(state, TransactionKind::Expense, id).await
}

pub async fn list_income(State(state): State<AppState>, Query(query): Query<LedgerQuery>) -> impl IntoResponse {
    list_ledger(state, TransactionKind::Income, query).await
}

pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    create_entry(state, TransactionKind::Income, request).await
}

pub async fn get_income(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    get_entry(state, TransactionKind::Income, id).await
}

pub async fn update_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    update_entry(state, TransactionKind::Income, id, request).await
}

pub async fn delete_income(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    delete_entry(state, TransactionKind::Income, id).await
}

fn build_filter(query: &TransactionSearchQuery) -> Result<TransactionFilter> {
    let filter = TransactionFilter::from_params(
        query.search.as_deref(),
        query.category.as_deref(),
        query.kind.as_deref(),
        query.date_from.as_deref(),
        query.date_to.as_deref(),
    )?;
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
        if from > to {
            return Err(TrackerError::validation(format!(
                "dateFrom {} is after dateTo {}",
                from, to
            )));
        }
    }
    Ok(filter)
}

/// Expenses and income matching every supplied filter, newest first
pub async fn search_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionSearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let filter = match build_filter(&query) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e, "search transactions"),
    };

    match state.transaction_service.search_transactions(&filter).await {
        Ok(transactions) => (StatusCode::OK, Json(TransactionMapper::to_list_response(transactions))).into_response(),
        Err(e) => error_response(&e, "search transactions"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::{CategoryKind, CreateCategoryRequest};

    async fn setup_test_state() -> (AppState, i64, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db);
        let food = state
            .category_service
            .create_category(CreateCategoryRequest {
                name: "Food".to_string(),
                kind: CategoryKind::Expense,
                color: None,
            })
            .await
            .unwrap();
        let salary = state
            .category_service
            .create_category(CreateCategoryRequest {
                name: "Salary".to_string(),
                kind: CategoryKind::Income,
                color: None,
            })
            .await
            .unwrap();
        (state, food.id, salary.id)
    }

    fn request(category_id: i64, amount: &str, description: &str, date: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            category_id,
            amount: amount.to_string(),
            description: description.to_string(),
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_expense_handler() {
        let (state, food, _) = setup_test_state().await;

        let response = create_expense(State(state), Json(request(food, "25.00", "Groceries", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_expense_handler_validation() {
        let (state, food, salary) = setup_test_state().await;

        let response = create_expense(State(state.clone()), Json(request(food, "-1", "Refund", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);

        let response = create_expense(State(state.clone()), Json(request(404, "1", "Lost", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);

        let response = create_expense(State(state), Json(request(salary, "1", "Wrong kind", "2024-01-15"))).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_income_crud_handlers() {
        let (state, _, salary) = setup_test_state().await;
        let income = state
            .transaction_service
            .create_transaction(TransactionKind::Income, request(salary, "4000", "Pay", "2024-01-31"))
            .await
            .unwrap();

        let response = get_income(State(state.clone()), Path(income.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let response = get_expense(State(state.clone()), Path(income.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);

        let response = update_income(
            State(state.clone()),
            Path(income.id),
            Json(request(salary, "4100", "Pay with raise", "2024-01-31")),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let response = delete_income(State(state.clone()), Path(income.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::NO_CONTENT);

        let response = delete_income(State(state), Path(income.id)).await;
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_expenses_handler_rejects_bad_range() {
        let (state, _, _) = setup_test_state().await;
        let query = LedgerQuery {
            start: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let response = list_expenses(State(state), Query(query)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_transactions_handler() {
        let (state, _, _) = setup_test_state().await;

        let response = search_transactions(State(state.clone()), Query(TransactionSearchQuery::default())).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let query = TransactionSearchQuery {
            kind: Some("transfers".to_string()),
            ..Default::default()
        };
        let response = search_transactions(State(state), Query(query)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_build_filter_rejects_inverted_dates() {
        let query = TransactionSearchQuery {
            date_from: Some("2024-02-01".to_string()),
            date_to: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&query).is_err());
    }
}
