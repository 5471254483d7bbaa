pub mod auth;
pub mod catalog;
pub mod health;
pub mod reports;
pub mod resources;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use backoffice_core::models::{
    ArticleCodes, PosEntries, PosRetrieval, PriceConsolidatedEntries, PricePosMappings, Prices,
    Products, Shops, StoreProducts,
};

use crate::handlers::price_pos;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                        login (public)
///
/// /shops, /shops/{id}                                CRUD
/// /pos-entries, /pos-entries/{id}                    CRUD
/// /pos-retrieval, /pos-retrieval/{id}                read-only
/// /pos-retrieval/stores, /pos-retrieval/download/*   reports
/// /stock-takes/variance-report/download[/date-range] reports
///
/// /price-pos, /price-pos/{id}                        CRUD
/// /price-pos/bulk                                    bulk create (entries or array)
/// /price-pos/{by-state|by-promoter|by-pos|by-pricelist}/{value}
/// /price-pos/lists/{field}, /price-pos/stats/{kind}
///
/// /product-management/products[/{id}]                CRUD
/// /product-management/prices[/{id}]                  CRUD
/// /product-management/...                            nested catalog routes
/// /products/stores                                   stores for assignment
///
/// /price-consolidated[/{id}]                         CRUD, bulk, lists, stats
/// /price-consolidated/upload-csv, /update-csv        multipart CSV
/// /store-product[/{id}]                              CRUD, bulk, lists, stats
/// /article-codes[/{id}]                              CRUD
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Shops and POS.
        .merge(resources::crud::<Shops>())
        .merge(resources::crud::<PosEntries>())
        .merge(resources::read_only::<PosRetrieval>())
        .merge(reports::router())
        // Price POS mappings.
        .merge(resources::crud::<PricePosMappings>())
        .merge(resources::lookups::<PricePosMappings>())
        .route("/price-pos/bulk", post(price_pos::bulk_create))
        .merge(price_pos_groups())
        // Product catalog.
        .merge(resources::crud::<Products>())
        .merge(resources::crud::<Prices>())
        .merge(catalog::router())
        // Consolidated prices and store products.
        .merge(resources::crud::<PriceConsolidatedEntries>())
        .merge(resources::bulk::<PriceConsolidatedEntries>())
        .merge(resources::lookups::<PriceConsolidatedEntries>())
        .merge(resources::csv_uploads::<PriceConsolidatedEntries>())
        .merge(resources::crud::<StoreProducts>())
        .merge(resources::bulk::<StoreProducts>())
        .merge(resources::lookups::<StoreProducts>())
        .merge(resources::crud::<ArticleCodes>())
}

/// `GET /price-pos/<group>/{value}` for each grouping the backend offers.
fn price_pos_groups() -> Router<AppState> {
    price_pos::GROUPS
        .iter()
        .fold(Router::new(), |router, &group| {
            router.route(
                &format!("/price-pos/{group}/{{value}}"),
                get(
                    move |state: State<AppState>,
                          headers: HeaderMap,
                          value: Path<String>,
                          query: Query<Vec<(String, String)>>| {
                        price_pos::grouped(group, state, headers, value, query)
                    },
                ),
            )
        })
}
