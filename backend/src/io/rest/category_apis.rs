//! # REST API for Category Management
//!
//! Endpoints for creating, listing, renaming, recoloring and deleting categories.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{CategoryKind, CategoryListResponse, CreateCategoryRequest, UpdateCategoryRequest};
use tracing::info;

use crate::io::rest::mappers::CategoryMapper;
use crate::io::rest::{error_response, not_found_response};
use crate::AppState;

/// Create a router for category related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[derive(Deserialize, Debug, Default)]
pub struct CategoryListQuery {
    pub kind: Option<CategoryKind>,
}

/// List categories, optionally only those of one kind
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> impl IntoResponse {
    info!("GET /api/categories - query: {:?}", query);

    match state.category_service.list_categories(query.kind).await {
        Ok(categories) => {
            let response = CategoryListResponse {
                categories: CategoryMapper::to_dto_list(categories),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e, "list categories"),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/categories - request: {:?}", request);

    match state.category_service.create_category(request).await {
        Ok(category) => (StatusCode::CREATED, Json(CategoryMapper::to_dto(category))).into_response(),
        Err(e) => error_response(&e, "create category"),
    }
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/categories/{}", category_id);

    match state.category_service.get_category(category_id).await {
        Ok(Some(category)) => (StatusCode::OK, Json(CategoryMapper::to_dto(category))).into_response(),
        Ok(None) => not_found_response("Category", category_id),
        Err(e) => error_response(&e, "get category"),
    }
}

/// Rename, recolor or change the kind of a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(request): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/categories/{} - request: {:?}", category_id, request);

    match state.category_service.update_category(category_id, request).await {
        Ok(category) => (StatusCode::OK, Json(CategoryMapper::to_dto(category))).into_response(),
        Err(e) => error_response(&e, "update category"),
    }
}

/// Delete a category and everything recorded against it
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/categories/{}", category_id);

    match state.category_service.delete_category(category_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found_response("Category", category_id),
        Err(e) => error_response(&e, "delete category"),
    }
}
