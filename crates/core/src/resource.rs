//! Resource descriptors.
//!
//! Each backend collection is described once by a marker type implementing
//! [`Resource`]; the generic client, list controller and mutation flow are
//! all parameterized by it.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::error::CoreError;
use crate::paging::PaginationStyle;

pub trait Resource: Send + Sync + 'static {
    /// Row type returned by list calls.
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;
    /// Type returned by `get`; usually the same as `Item`.
    type Detail: DeserializeOwned + Send + 'static;
    type Id: fmt::Display + fmt::Debug + Clone + PartialEq + Send + Sync + 'static;

    /// Collection path relative to the API root, without slashes at either end.
    const PATH: &'static str;
    /// Human-readable names used in error messages ("shop" / "shops").
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    const PAGINATION: PaginationStyle;
    /// Key holding the rows in the list envelope; `None` for a bare array.
    const ITEMS_KEY: Option<&'static str>;
    const DEFAULT_PAGE_SIZE: u32;
    /// Filter names accepted by the list endpoint.
    const FILTERS: &'static [&'static str] = &[];

    fn id_of(item: &Self::Item) -> Self::Id;
}

/// Resources that support create, update and delete.
pub trait MutableResource: Resource {
    type Create: Serialize + Validate + Default + Clone + Send + Sync + 'static;
    type Update: Serialize + Validate + Clone + Send + Sync + 'static;
    /// Body returned by create/update.
    type Saved: DeserializeOwned + Send + 'static;
}

/// Resources with a JSON bulk endpoint (`POST <path>/bulk {entries}`).
pub trait BulkResource: MutableResource {
    const BULK_PATH: &'static str = "bulk";
}

/// Resources that ingest CSV files.
pub trait CsvUploadResource: Resource {
    /// Endpoint for appending rows.
    const UPLOAD_PATH: &'static str;
    /// Endpoint for upserting rows, if the backend offers one.
    const UPDATE_UPLOAD_PATH: Option<&'static str> = None;
}

/// Reject filter names the resource does not know.
pub fn check_filter<R: Resource>(name: &str) -> Result<(), CoreError> {
    if R::FILTERS.contains(&name) {
        Ok(())
    } else {
        Err(CoreError::UnknownFilter {
            resource: R::PLURAL,
            filter: name.to_string(),
        })
    }
}

/// Action phrase used in error messages, e.g. `"fetch shops"`.
pub fn action<R: Resource>(verb: &str, plural: bool) -> String {
    let noun = if plural { R::PLURAL } else { R::SINGULAR };
    format!("{verb} {noun}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pos::PosEntries;
    use crate::models::shop::Shops;
    use assert_matches::assert_matches;

    #[test]
    fn known_filters_pass() {
        assert!(check_filter::<PosEntries>("store_name").is_ok());
    }

    #[test]
    fn unknown_filters_are_rejected() {
        assert_matches!(
            check_filter::<Shops>("store_name"),
            Err(CoreError::UnknownFilter { resource: "shops", .. })
        );
    }

    #[test]
    fn action_phrases() {
        assert_eq!(action::<Shops>("fetch", true), "fetch shops");
        assert_eq!(action::<PosEntries>("delete", false), "delete POS entry");
    }
}
