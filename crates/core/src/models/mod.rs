//! Backend record types and their resource descriptors.

pub mod article_code;
pub mod pos;
pub mod price_consolidated;
pub mod price_pos;
pub mod product;
pub mod shop;
pub mod stock_take;
pub mod store_product;

pub use article_code::ArticleCodes;
pub use pos::{PosEntries, PosRetrieval};
pub use price_consolidated::PriceConsolidatedEntries;
pub use price_pos::PricePosMappings;
pub use product::{Prices, Products};
pub use shop::Shops;
pub use stock_take::StockVariance;
pub use store_product::StoreProducts;

/// Per-field counts returned by the `stats/by-*` endpoints.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupCount {
    #[serde(flatten)]
    pub key: serde_json::Map<String, serde_json::Value>,
    pub count: u64,
}
