//! Product-management routes beyond plain CRUD.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET, POST  /product-management/products/{id}/promoter-assignments
/// GET        /product-management/products/{id}/prices
/// GET        /product-management/products/{id}/stores-with-promoters
/// PUT, DELETE /product-management/promoter-assignments/{id}
/// GET        /product-management/stores/{id}/promoters
/// GET        /products/stores
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/product-management/products/{id}/promoter-assignments",
            get(catalog::list_promoter_assignments).post(catalog::create_promoter_assignment),
        )
        .route(
            "/product-management/products/{id}/prices",
            get(catalog::product_prices),
        )
        .route(
            "/product-management/products/{id}/stores-with-promoters",
            get(catalog::stores_with_promoters),
        )
        .route(
            "/product-management/promoter-assignments/{id}",
            put(catalog::update_promoter_assignment).delete(catalog::delete_promoter_assignment),
        )
        .route(
            "/product-management/stores/{id}/promoters",
            get(catalog::store_promoters),
        )
        .route("/products/stores", get(catalog::available_stores))
}
