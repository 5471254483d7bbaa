use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{MutableResource, Resource};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: DbId,
    pub company: String,
    pub users: String,
    pub pos_shop_name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateShopRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "is required"))]
    pub users: String,
    #[validate(length(min = 1, message = "is required"))]
    pub pos_shop_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Edits keep the stored password unless a new one is entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateShopRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "is required"))]
    pub users: String,
    #[validate(length(min = 1, message = "is required"))]
    pub pos_shop_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: Option<String>,
}

impl From<&Shop> for UpdateShopRequest {
    fn from(shop: &Shop) -> Self {
        Self {
            company: shop.company.clone(),
            users: shop.users.clone(),
            pos_shop_name: shop.pos_shop_name.clone(),
            email: shop.email.clone(),
            password: None,
        }
    }
}

pub struct Shops;

impl Resource for Shops {
    type Item = Shop;
    type Detail = Shop;
    type Id = DbId;

    const PATH: &'static str = "shops";
    const SINGULAR: &'static str = "shop";
    const PLURAL: &'static str = "shops";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = None;
    const DEFAULT_PAGE_SIZE: u32 = 300;

    fn id_of(item: &Shop) -> DbId {
        item.id
    }
}

impl MutableResource for Shops {
    type Create = CreateShopRequest;
    type Update = UpdateShopRequest;
    type Saved = Shop;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_form_omits_blank_password() {
        let shop = Shop {
            id: 4,
            company: "Acme".into(),
            users: "alice".into(),
            pos_shop_name: "Acme Central".into(),
            email: "ops@acme.example".into(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let body = serde_json::to_value(UpdateShopRequest::from(&shop)).unwrap();
        assert_eq!(
            body,
            json!({
                "company": "Acme",
                "users": "alice",
                "pos_shop_name": "Acme Central",
                "email": "ops@acme.example",
            })
        );
    }

    #[test]
    fn default_create_form_is_invalid() {
        assert!(CreateShopRequest::default().validate().is_err());
    }
}
