use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{BulkResource, MutableResource, Resource};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProduct {
    pub id: DbId,
    pub ykey: String,
    pub product_name: String,
    pub store: String,
    pub state: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateStoreProductRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub ykey: String,
    #[validate(length(min = 1, message = "is required"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub store: String,
    #[validate(length(min = 1, message = "is required"))]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateStoreProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ykey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<&StoreProduct> for UpdateStoreProductRequest {
    fn from(row: &StoreProduct) -> Self {
        Self {
            ykey: Some(row.ykey.clone()),
            product_name: Some(row.product_name.clone()),
            store: Some(row.store.clone()),
            state: Some(row.state.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProductStatsOverview {
    pub total_entries: u64,
    pub unique_ykeys: u64,
    pub unique_stores: u64,
    pub unique_states: u64,
}

pub struct StoreProducts;

impl Resource for StoreProducts {
    type Item = StoreProduct;
    type Detail = StoreProduct;
    type Id = DbId;

    const PATH: &'static str = "store-product";
    const SINGULAR: &'static str = "store product";
    const PLURAL: &'static str = "store products";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = Some("items");
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const FILTERS: &'static [&'static str] = &["ykey", "store", "state", "search"];

    fn id_of(item: &StoreProduct) -> DbId {
        item.id
    }
}

impl MutableResource for StoreProducts {
    type Create = CreateStoreProductRequest;
    type Update = UpdateStoreProductRequest;
    type Saved = StoreProduct;
}

impl BulkResource for StoreProducts {}
