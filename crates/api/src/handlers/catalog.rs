//! Product-management routes nested under products, assignments and stores.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::Json;
use backoffice_core::models::Products;
use backoffice_core::resource::Resource;
use serde_json::Value;

use crate::error::AppResult;
use crate::proxy::Success;
use crate::state::AppState;

const PROMOTER_ASSIGNMENTS: &str = "product-management/promoter-assignments";

/// GET /api/product-management/products/{id}/promoter-assignments
pub async fn list_promoter_assignments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(Products::PATH, &[product_id.as_str(), "promoter-assignments"]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, "fetch promoter assignments", Success::Ok)
        .await
}

/// POST /api/product-management/products/{id}/promoter-assignments
pub async fn create_promoter_assignment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(Products::PATH, &[product_id.as_str(), "promoter-assignments"]);
    let builder = state.backend.request(Method::POST, url, &headers).json(&body);
    state
        .backend
        .relay(builder, "create promoter assignment", Success::Created)
        .await
}

/// PUT /api/product-management/promoter-assignments/{id}
pub async fn update_promoter_assignment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(assignment_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(PROMOTER_ASSIGNMENTS, &[assignment_id.as_str()]);
    let builder = state.backend.request(Method::PUT, url, &headers).json(&body);
    state
        .backend
        .relay(builder, "update promoter assignment", Success::Ok)
        .await
}

/// DELETE /api/product-management/promoter-assignments/{id}
pub async fn delete_promoter_assignment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(assignment_id): Path<String>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(PROMOTER_ASSIGNMENTS, &[assignment_id.as_str()]);
    let builder = state.backend.request(Method::DELETE, url, &headers);
    state
        .backend
        .relay(builder, "delete promoter assignment", Success::NoContent)
        .await
}

/// GET /api/product-management/products/{id}/prices
pub async fn product_prices(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(Products::PATH, &[product_id.as_str(), "prices"]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, "fetch product prices", Success::Ok)
        .await
}

/// GET /api/product-management/products/{id}/stores-with-promoters
pub async fn stores_with_promoters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url(Products::PATH, &[product_id.as_str(), "stores-with-promoters"]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, "fetch product stores", Success::Ok)
        .await
}

/// GET /api/product-management/stores/{id}/promoters
pub async fn store_promoters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(store_id): Path<String>,
) -> AppResult<Response> {
    let url = state
        .backend
        .url("product-management/stores", &[store_id.as_str(), "promoters"]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, "fetch store promoters", Success::Ok)
        .await
}

/// GET /api/products/stores
pub async fn available_stores(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let url = state.backend.url("products/stores", &[""]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, "fetch stores", Success::Ok)
        .await
}
