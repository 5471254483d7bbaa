//! Promoter-to-point-of-sale price list mappings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{BulkResource, MutableResource, Resource};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePos {
    pub id: DbId,
    pub state: String,
    pub point_of_sale: String,
    pub promoter: String,
    pub pricelist: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePricePosRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "is required"))]
    pub point_of_sale: String,
    #[validate(length(min = 1, message = "is required"))]
    pub promoter: String,
    #[validate(length(min = 1, message = "is required"))]
    pub pricelist: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdatePricePosRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_of_sale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricelist: Option<String>,
}

impl From<&PricePos> for UpdatePricePosRequest {
    fn from(row: &PricePos) -> Self {
        Self {
            state: Some(row.state.clone()),
            point_of_sale: Some(row.point_of_sale.clone()),
            promoter: Some(row.promoter.clone()),
            pricelist: Some(row.pricelist.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePosStatsOverview {
    pub total_entries: u64,
    pub unique_states: u64,
    pub unique_pos: u64,
    pub unique_promoters: u64,
    pub unique_pricelists: u64,
}

pub struct PricePosMappings;

impl Resource for PricePosMappings {
    type Item = PricePos;
    type Detail = PricePos;
    type Id = DbId;

    const PATH: &'static str = "price-pos";
    const SINGULAR: &'static str = "price POS entry";
    const PLURAL: &'static str = "price POS entries";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = Some("items");
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const FILTERS: &'static [&'static str] =
        &["state", "point_of_sale", "promoter", "pricelist", "search"];

    fn id_of(item: &PricePos) -> DbId {
        item.id
    }
}

impl MutableResource for PricePosMappings {
    type Create = CreatePricePosRequest;
    type Update = UpdatePricePosRequest;
    type Saved = PricePos;
}

impl BulkResource for PricePosMappings {}
