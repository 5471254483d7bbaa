//! Product catalog: products, their promoter assignments, prices and store
//! availability.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{MutableResource, Resource};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoterAssignment {
    pub id: DbId,
    pub products: String,
    pub article_code: i64,
    pub promoter: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: DbId,
    pub pricelist: String,
    pub product: String,
    pub price: f64,
    pub gst: f64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreAssignment {
    pub id: DbId,
    pub store_id: DbId,
    pub product_id: String,
    pub store_name: String,
    pub state_name: String,
    #[serde(default)]
    pub promoters: Vec<String>,
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_type: String,
    pub product_description: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(default)]
    pub promoter_assignments: Vec<PromoterAssignment>,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default)]
    pub store_assignments: Vec<StoreAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePromoter {
    pub id: DbId,
    pub promoter: String,
    pub point_of_sale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePromotersResponse {
    pub store_id: DbId,
    pub store_name: String,
    pub state: String,
    pub promoters: Vec<StorePromoter>,
    pub total_promoters: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStore {
    pub store_id: DbId,
    pub store_name: String,
    pub state: String,
    pub is_available: bool,
    #[serde(default)]
    pub promoters: Vec<StorePromoter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStoresWithPromotersResponse {
    pub product_id: String,
    pub product_description: String,
    pub stores: Vec<ProductStore>,
    pub total_stores: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableStore {
    pub store_id: DbId,
    pub store_name: String,
    pub state_id: DbId,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableStoresResponse {
    pub stores: Vec<AvailableStore>,
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Write models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPromoterAssignment {
    pub article_code: i64,
    #[validate(length(min = 1, message = "is required"))]
    pub promoter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProductPrice {
    #[validate(length(min = 1, message = "is required"))]
    pub pricelist: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub gst: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub product_type: String,
    pub product_description: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub promoter_assignments: Vec<NewPromoterAssignment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub prices: Vec<NewProductPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_ids: Vec<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_create_article_codes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_article_code: Option<i64>,
}

impl Default for CreateProductRequest {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            product_type: String::new(),
            product_description: String::new(),
            is_active: true,
            promoter_assignments: Vec::new(),
            prices: Vec::new(),
            store_ids: Vec::new(),
            auto_create_article_codes: None,
            base_article_code: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Product> for UpdateProductRequest {
    fn from(product: &Product) -> Self {
        Self {
            product_type: Some(product.product_type.clone()),
            product_description: Some(product.product_description.clone()),
            is_active: Some(product.is_active),
        }
    }
}

pub type CreatePromoterAssignmentRequest = NewPromoterAssignment;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdatePromoterAssignmentRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub promoter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePriceRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub pricelist: String,
    #[validate(length(min = 1, message = "is required"))]
    pub product: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub gst: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdatePriceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricelist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub gst: Option<f64>,
}

impl From<&Price> for UpdatePriceRequest {
    fn from(price: &Price) -> Self {
        Self {
            pricelist: Some(price.pricelist.clone()),
            product: Some(price.product.clone()),
            price: Some(price.price),
            gst: Some(price.gst),
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

pub struct Products;

impl Resource for Products {
    type Item = Product;
    type Detail = Product;
    type Id = String;

    const PATH: &'static str = "product-management/products";
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = Some("products");
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const FILTERS: &'static [&'static str] = &["product_type", "search", "is_active", "promoter"];

    fn id_of(item: &Product) -> String {
        item.product_id.clone()
    }
}

impl MutableResource for Products {
    type Create = CreateProductRequest;
    type Update = UpdateProductRequest;
    type Saved = Product;
}

pub struct Prices;

impl Resource for Prices {
    type Item = Price;
    type Detail = Price;
    type Id = DbId;

    const PATH: &'static str = "product-management/prices";
    const SINGULAR: &'static str = "price";
    const PLURAL: &'static str = "prices";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = Some("prices");
    const DEFAULT_PAGE_SIZE: u32 = 100;
    const FILTERS: &'static [&'static str] = &["pricelist", "product"];

    fn id_of(item: &Price) -> DbId {
        item.id
    }
}

impl MutableResource for Prices {
    type Create = CreatePriceRequest;
    type Update = UpdatePriceRequest;
    type Saved = Price;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_list_row_tolerates_missing_nested_collections() {
        let product: Product = serde_json::from_value(json!({
            "product_id": "SKU-1",
            "product_type": "beverage",
            "product_description": "Cold brew",
            "is_active": true,
        }))
        .unwrap();
        assert!(product.prices.is_empty());
        assert_eq!(Products::id_of(&product), "SKU-1");
    }

    #[test]
    fn create_product_omits_empty_optional_sections() {
        let body = serde_json::to_value(CreateProductRequest {
            product_id: "SKU-1".into(),
            product_type: "beverage".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "product_id": "SKU-1",
                "product_type": "beverage",
                "product_description": "",
                "is_active": true,
            })
        );
    }

    #[test]
    fn nested_price_rows_are_validated() {
        let request = CreateProductRequest {
            product_id: "SKU-1".into(),
            product_type: "beverage".into(),
            prices: vec![NewProductPrice {
                pricelist: "retail".into(),
                price: -1.0,
                gst: 0.0,
            }],
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
