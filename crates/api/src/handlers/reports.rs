//! Report downloads: POS retrieval and stock-take variance.
//!
//! Date-filtered routes check their parameters before contacting the
//! backend. The client renders the returned JSON as CSV.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::error::AppResult;
use crate::proxy::{forward_query, require_params, Success};
use crate::state::AppState;

const DATE_REQUIRED: &str = "Date parameter is required (format: YYYY-MM-DD)";
const RANGE_REQUIRED: &str =
    "Both start_date and end_date parameters are required (format: YYYY-MM-DD)";

async fn download(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
    query: Vec<(String, String)>,
    action: &str,
) -> AppResult<Response> {
    let url = state.backend.url(path, &[]);
    tracing::debug!(path, ?query, "Forwarding report download");
    let builder = state
        .backend
        .request(Method::GET, url, headers)
        .query(&query);
    state.backend.relay(builder, action, Success::Ok).await
}

/// GET /api/pos-retrieval/stores
pub async fn pos_stores(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    download(&state, &headers, "pos-retrieval/stores", Vec::new(), "fetch stores").await
}

/// GET /api/pos-retrieval/download/all?store_name=
pub async fn pos_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, Vec::new());
    download(
        &state,
        &headers,
        "pos-retrieval/download/all",
        query,
        "download all POS data",
    )
    .await
}

/// GET /api/pos-retrieval/download/by-date?date=&store_name=
pub async fn pos_by_date(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, Vec::new());
    require_params(&query, &["date"], DATE_REQUIRED)?;
    download(
        &state,
        &headers,
        "pos-retrieval/download/by-date",
        query,
        "download POS data by date",
    )
    .await
}

/// GET /api/pos-retrieval/download/date-range?start_date=&end_date=&store_name=
pub async fn pos_date_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, Vec::new());
    require_params(&query, &["start_date", "end_date"], RANGE_REQUIRED)?;
    download(
        &state,
        &headers,
        "pos-retrieval/download/date-range",
        query,
        "download POS data by date range",
    )
    .await
}

/// GET /api/stock-takes/variance-report/download
pub async fn stock_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, Vec::new());
    download(
        &state,
        &headers,
        "stock-takes/variance-report/download",
        query,
        "download stock variance report",
    )
    .await
}

/// GET /api/stock-takes/variance-report/download/date-range?start_date=&end_date=
pub async fn stock_date_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = forward_query(query, Vec::new());
    let dates = require_params(&query, &["start_date", "end_date"], RANGE_REQUIRED)?;
    let query = vec![
        ("start_date".to_string(), dates[0].clone()),
        ("end_date".to_string(), dates[1].clone()),
    ];
    download(
        &state,
        &headers,
        "stock-takes/variance-report/download/date-range",
        query,
        "download stock variance report by date range",
    )
    .await
}
