//! Results of bulk writes: CSV uploads and JSON bulk-create calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row the backend could not ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRowError {
    pub row: u64,
    pub error: String,
    #[serde(default)]
    pub data: Value,
}

/// Outcome of a CSV upload. Produced once per upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkTransferResult {
    /// Absent in older backend responses; see [`BulkTransferResult::succeeded`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub created_count: u64,
    #[serde(default)]
    pub updated_count: u64,
    #[serde(default)]
    pub skipped_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub errors: Vec<BulkRowError>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub processing_time_seconds: f64,
}

impl BulkTransferResult {
    /// The backend's verdict, or "nothing failed" when it gave none.
    pub fn succeeded(&self) -> bool {
        self.success.unwrap_or(!self.has_failures())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count > 0 || !self.errors.is_empty()
    }

    /// One-line summary for a status banner.
    pub fn summary(&self) -> String {
        format!(
            "Created {}, updated {}, skipped {}, failed {}",
            self.created_count, self.updated_count, self.skipped_count, self.failed_count
        )
    }
}

/// Body of `POST <resource>/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkCreateRequest<T> {
    pub entries: Vec<T>,
}

/// Response of the JSON bulk endpoints. Row errors are passed through
/// untyped since each resource reports them differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub created_count: u64,
    #[serde(default)]
    pub updated_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upload_result_surfaces_row_errors() {
        let result: BulkTransferResult = serde_json::from_value(json!({
            "created_count": 8,
            "updated_count": 2,
            "failed_count": 1,
            "errors": [{"row": 5, "error": "invalid price"}],
        }))
        .unwrap();

        assert!(result.has_failures());
        assert!(!result.succeeded());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 5);
        assert_eq!(result.errors[0].error, "invalid price");
        assert_eq!(result.summary(), "Created 8, updated 2, skipped 0, failed 1");
    }

    #[test]
    fn explicit_success_flag_wins() {
        let result: BulkTransferResult = serde_json::from_value(json!({
            "success": true,
            "created_count": 3,
        }))
        .unwrap();
        assert!(result.succeeded());

        let result: BulkTransferResult =
            serde_json::from_value(json!({"created_count": 3})).unwrap();
        assert_eq!(result.success, None);
        assert!(result.succeeded());
    }
}
