use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// ```text
/// GET /pos-retrieval/stores
/// GET /pos-retrieval/download/all
/// GET /pos-retrieval/download/by-date           (date required)
/// GET /pos-retrieval/download/date-range        (start_date, end_date required)
/// GET /stock-takes/variance-report/download
/// GET /stock-takes/variance-report/download/date-range
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pos-retrieval/stores", get(reports::pos_stores))
        .route("/pos-retrieval/download/all", get(reports::pos_all))
        .route("/pos-retrieval/download/by-date", get(reports::pos_by_date))
        .route(
            "/pos-retrieval/download/date-range",
            get(reports::pos_date_range),
        )
        .route(
            "/stock-takes/variance-report/download",
            get(reports::stock_all),
        )
        .route(
            "/stock-takes/variance-report/download/date-range",
            get(reports::stock_date_range),
        )
}
