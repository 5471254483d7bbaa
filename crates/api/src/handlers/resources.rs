//! Generic pass-through handlers, parameterized by a core resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::Json;
use backoffice_core::resource::action;
use serde_json::Value;

use crate::error::AppResult;
use crate::proxy::{forward_query, Proxied, Success};
use crate::state::AppState;

/// GET /api/<path>
pub async fn list<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, R::default_query());
    let url = state.backend.collection_url::<R>();
    let builder = state
        .backend
        .request(Method::GET, url, &headers)
        .query(&query);
    state
        .backend
        .relay(builder, &action::<R>("fetch", true), Success::Ok)
        .await
}

/// POST /api/<path>
pub async fn create<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let url = state.backend.collection_url::<R>();
    let builder = state.backend.request(Method::POST, url, &headers).json(&body);
    state
        .backend
        .relay(builder, &action::<R>("create", false), Success::Created)
        .await
}

/// GET /api/<path>/{id}
pub async fn get<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &[id.as_str()]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, &action::<R>("fetch", false), Success::Ok)
        .await
}

/// PUT /api/<path>/{id}
pub async fn update<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &[id.as_str()]);
    let builder = state.backend.request(Method::PUT, url, &headers).json(&body);
    state
        .backend
        .relay(builder, &action::<R>("update", false), Success::Ok)
        .await
}

/// DELETE /api/<path>/{id}
pub async fn delete<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &[id.as_str()]);
    let builder = state.backend.request(Method::DELETE, url, &headers);
    tracing::info!(resource = R::SINGULAR, id = %id, "Forwarding delete");
    state
        .backend
        .relay(builder, &action::<R>("delete", false), Success::NoContent)
        .await
}

/// POST /api/<path>/bulk
pub async fn bulk_create<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &["bulk"]);
    let builder = state.backend.request(Method::POST, url, &headers).json(&body);
    state
        .backend
        .relay(builder, &format!("bulk create {}", R::PLURAL), Success::Created)
        .await
}

/// GET /api/<path>/lists/{field}
pub async fn list_values<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(field): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &["lists", field.as_str()]);
    let builder = state
        .backend
        .request(Method::GET, url, &headers)
        .query(&forward_query(query, Vec::new()));
    state
        .backend
        .relay(builder, &format!("fetch unique {field}"), Success::Ok)
        .await
}

/// GET /api/<path>/stats/{kind}
pub async fn stats<R: Proxied>(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
) -> AppResult<Response> {
    let url = state.backend.url(R::PATH, &["stats", kind.as_str()]);
    let builder = state.backend.request(Method::GET, url, &headers);
    state
        .backend
        .relay(builder, &format!("fetch {} statistics", R::SINGULAR), Success::Ok)
        .await
}
