//! Price POS routes that do not fit the generic resource handlers.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::Json;
use backoffice_core::models::PricePosMappings;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::proxy::{forward_query, Success};
use crate::state::AppState;

/// Groupings the backend can filter by.
pub const GROUPS: [&str; 4] = ["by-state", "by-promoter", "by-pos", "by-pricelist"];

/// POST /api/price-pos/bulk
///
/// Accepts `{"entries": [...]}` or a bare array; the backend collection
/// endpoint takes the array itself.
pub async fn bulk_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let entries = match body {
        Value::Object(mut map) if map.contains_key("entries") => map
            .remove("entries")
            .unwrap_or_else(|| Value::Array(Vec::new())),
        other => other,
    };
    if !entries.is_array() {
        return Err(AppError::BadRequest(
            "Expected an array of entries or {\"entries\": [...]}".into(),
        ));
    }

    let url = state.backend.collection_url::<PricePosMappings>();
    let builder = state
        .backend
        .request(Method::POST, url, &headers)
        .json(&entries);
    state
        .backend
        .relay(builder, "bulk create price POS mappings", Success::Created)
        .await
}

/// GET /api/price-pos/<group>/{value}, one route per entry in [`GROUPS`].
pub async fn grouped(
    group: &'static str,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(value): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let url = state.backend.url("price-pos", &[group, value.as_str()]);
    let builder = state
        .backend
        .request(Method::GET, url, &headers)
        .query(&forward_query(query, Vec::new()));
    let action = format!(
        "fetch price POS mappings {}",
        group.replacen("by-", "by ", 1)
    );
    state.backend.relay(builder, &action, Success::Ok).await
}
