use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::PaginationStyle;
use crate::resource::{MutableResource, Resource};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCode {
    pub id: DbId,
    pub products: String,
    pub article_codes: i64,
    pub promoter: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateArticleCodeRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub products: String,
    #[validate(range(min = 1, message = "must be a positive number"))]
    pub article_codes: i64,
    #[validate(length(min = 1, message = "is required"))]
    pub promoter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateArticleCodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "must be a positive number"))]
    pub article_codes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoter: Option<String>,
}

impl From<&ArticleCode> for UpdateArticleCodeRequest {
    fn from(row: &ArticleCode) -> Self {
        Self {
            products: Some(row.products.clone()),
            article_codes: Some(row.article_codes),
            promoter: Some(row.promoter.clone()),
        }
    }
}

pub struct ArticleCodes;

impl Resource for ArticleCodes {
    type Item = ArticleCode;
    type Detail = ArticleCode;
    type Id = DbId;

    const PATH: &'static str = "article-codes";
    const SINGULAR: &'static str = "article code";
    const PLURAL: &'static str = "article codes";
    const PAGINATION: PaginationStyle = PaginationStyle::SkipLimit;
    const ITEMS_KEY: Option<&'static str> = None;
    const DEFAULT_PAGE_SIZE: u32 = 100;
    const FILTERS: &'static [&'static str] = &["search", "article_code"];

    fn id_of(item: &ArticleCode) -> DbId {
        item.id
    }
}

impl MutableResource for ArticleCodes {
    type Create = CreateArticleCodeRequest;
    type Update = UpdateArticleCodeRequest;
    type Saved = ArticleCode;
}
