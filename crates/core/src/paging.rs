//! Page requests and normalized collection pages.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;

/// How a resource encodes pagination on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// `skip=(page-1)*size&limit=size`
    SkipLimit,
    /// `page=N&page_size=size`
    PageNumber,
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        if page_size == 0 {
            return Err(CoreError::Validation(
                "page size must be greater than zero".into(),
            ));
        }
        Ok(Self { page, page_size })
    }

    /// First page of the given size.
    pub fn first(page_size: u32) -> Result<Self, CoreError> {
        Self::new(1, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn query_pairs(&self, style: PaginationStyle) -> Vec<(String, String)> {
        match style {
            PaginationStyle::SkipLimit => vec![
                ("skip".into(), self.skip().to_string()),
                ("limit".into(), self.page_size.to_string()),
            ],
            PaginationStyle::PageNumber => vec![
                ("page".into(), self.page.to_string()),
                ("page_size".into(), self.page_size.to_string()),
            ],
        }
    }
}

/// One page of a collection with the server's total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for CollectionPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T: DeserializeOwned> CollectionPage<T> {
    /// Normalize a list response.
    ///
    /// A bare array is its own page with `total = len`. An object carries
    /// the rows under `items_key` and an optional `total`.
    pub fn from_value(value: Value, items_key: Option<&str>) -> Result<Self, CoreError> {
        match (value, items_key) {
            (Value::Array(rows), _) => {
                let items = decode_rows::<T>(rows)?;
                let total = items.len() as u64;
                Ok(Self { items, total })
            }
            (Value::Object(mut map), Some(key)) => {
                let rows = match map.remove(key) {
                    Some(Value::Array(rows)) => rows,
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => {
                        return Err(CoreError::Malformed(format!(
                            "expected '{key}' to be an array, got {other}"
                        )))
                    }
                };
                let items = decode_rows::<T>(rows)?;
                let total = map
                    .get("total")
                    .and_then(Value::as_u64)
                    .unwrap_or(items.len() as u64);
                Ok(Self { items, total })
            }
            (other, _) => Err(CoreError::Malformed(format!(
                "unexpected list response: {other}"
            ))),
        }
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, CoreError> {
    serde_json::from_value(Value::Array(rows)).map_err(|e| CoreError::Malformed(e.to_string()))
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn page_request_rejects_zero_values() {
        assert_matches!(PageRequest::new(0, 10), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(1, 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn skip_limit_encoding() {
        let req = PageRequest::new(3, 20).unwrap();
        assert_eq!(
            req.query_pairs(PaginationStyle::SkipLimit),
            vec![
                ("skip".to_string(), "40".to_string()),
                ("limit".to_string(), "20".to_string())
            ]
        );
    }

    #[test]
    fn page_number_encoding() {
        let req = PageRequest::new(2, 10).unwrap();
        assert_eq!(
            req.query_pairs(PaginationStyle::PageNumber),
            vec![
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn bare_array_total_is_length() {
        let page: CollectionPage<i64> = CollectionPage::from_value(json!([1, 2, 3]), None).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn keyed_envelope_uses_server_total() {
        let body = json!({"entries": [1, 2], "total": 57, "page": 1, "page_size": 2});
        let page: CollectionPage<i64> = CollectionPage::from_value(body, Some("entries")).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total, 57);
    }

    #[test]
    fn missing_items_key_is_empty_page() {
        let page: CollectionPage<i64> =
            CollectionPage::from_value(json!({"total": 0}), Some("items")).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn object_without_key_is_malformed() {
        let result: Result<CollectionPage<i64>, _> = CollectionPage::from_value(json!({}), None);
        assert_matches!(result, Err(CoreError::Malformed(_)));
    }

    #[test]
    fn total_pages_rounds_up_and_floors_at_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(57, 20), 3);
    }
}
