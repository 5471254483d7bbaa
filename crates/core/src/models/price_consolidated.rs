//! Consolidated price list rows, maintained by CSV upload or by hand.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{BulkResource, CsvUploadResource, MutableResource, Resource};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConsolidated {
    pub id: DbId,
    pub pricelist: String,
    pub product: String,
    pub price: f64,
    #[serde(default)]
    pub gst: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_with_gst: Option<f64>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePriceConsolidatedRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub pricelist: String,
    #[validate(length(min = 1, message = "is required"))]
    pub product: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub gst: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdatePriceConsolidatedRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricelist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    /// `Some(None)` clears the GST rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst: Option<Option<f64>>,
}

impl From<&PriceConsolidated> for UpdatePriceConsolidatedRequest {
    fn from(row: &PriceConsolidated) -> Self {
        Self {
            pricelist: Some(row.pricelist.clone()),
            product: Some(row.product.clone()),
            price: Some(row.price),
            gst: Some(row.gst),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConsolidatedStatsOverview {
    pub total_entries: u64,
    pub unique_pricelists: u64,
    pub unique_products: u64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub entries_with_gst: u64,
}

pub struct PriceConsolidatedEntries;

impl Resource for PriceConsolidatedEntries {
    type Item = PriceConsolidated;
    type Detail = PriceConsolidated;
    type Id = DbId;

    const PATH: &'static str = "price-consolidated";
    const SINGULAR: &'static str = "price consolidated entry";
    const PLURAL: &'static str = "price consolidated entries";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = Some("items");
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const FILTERS: &'static [&'static str] = &[
        "pricelist",
        "product",
        "min_price",
        "max_price",
        "has_gst",
        "search",
    ];

    fn id_of(item: &PriceConsolidated) -> DbId {
        item.id
    }
}

impl MutableResource for PriceConsolidatedEntries {
    type Create = CreatePriceConsolidatedRequest;
    type Update = UpdatePriceConsolidatedRequest;
    type Saved = PriceConsolidated;
}

impl BulkResource for PriceConsolidatedEntries {}

impl CsvUploadResource for PriceConsolidatedEntries {
    const UPLOAD_PATH: &'static str = "upload-csv";
    const UPDATE_UPLOAD_PATH: Option<&'static str> = Some("update-csv");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clearing_gst_sends_explicit_null() {
        let update = UpdatePriceConsolidatedRequest {
            gst: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"gst": null}));
    }

    #[test]
    fn untouched_gst_is_omitted() {
        let update = UpdatePriceConsolidatedRequest {
            price: Some(9.5),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"price": 9.5}));
    }
}
