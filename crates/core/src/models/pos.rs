//! POS entries (store submissions with items and scanned barcode pages) and
//! the flattened retrieval rows used for reporting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::csv_export::{
    number, CsvColumn, CsvDownload, DateScope, DownloadEndpoint, DownloadQuery,
};
use crate::error::CoreError;
use crate::paging::PaginationStyle;
use crate::resource::{MutableResource, Resource};
use crate::types::Timestamp;

/// Date format of general notes on the write path (`DD-MM-YYYY`).
pub const NOTE_DATE_FORMAT: &str = "%d-%m-%Y";

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosEntry {
    pub id: String,
    pub note_date: String,
    pub promoter_name: String,
    pub store_name: String,
    pub total_items: u64,
    pub total_barcode_pages: u64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosGeneralNote {
    pub id: String,
    pub note_date: String,
    pub promoter_name: String,
    pub note: String,
    pub store_name: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosItem {
    #[serde(default)]
    pub id: Option<String>,
    pub ykey: String,
    pub product: String,
    pub quantity: f64,
    pub price: f64,
    pub unit: String,
    pub discount: f64,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosBarcodeProduct {
    #[serde(default)]
    pub id: Option<String>,
    pub barcode: String,
    pub product: String,
    pub price: f64,
    pub article_code: i64,
    #[serde(default)]
    pub weight_code: Option<String>,
    pub barcode_format: String,
    pub store_name: String,
    pub pricelist: String,
    #[serde(default)]
    pub weight: Option<f64>,
    pub gst: f64,
    pub price_with_gst: f64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosBarcodePage {
    #[serde(default)]
    pub id: Option<String>,
    pub page_number: u32,
    pub count: u64,
    #[serde(default)]
    pub products: Vec<PosBarcodeProduct>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosEntryDetail {
    pub general_note: PosGeneralNote,
    #[serde(default)]
    pub items: Vec<PosItem>,
    #[serde(default)]
    pub barcodes: Vec<PosBarcodePage>,
    pub total_items: u64,
    pub total_barcode_pages: u64,
    pub total_products_scanned: u64,
}

// ---------------------------------------------------------------------------
// Write models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePosItem {
    #[validate(length(min = 1, message = "is required"))]
    pub ykey: String,
    #[validate(length(min = 1, message = "is required"))]
    pub product: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub quantity: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    pub unit: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub discount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePosBarcodeProduct {
    #[validate(length(min = 1, message = "is required"))]
    pub barcode: String,
    pub product: String,
    pub price: f64,
    pub article_code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_code: Option<String>,
    pub barcode_format: String,
    pub store_name: String,
    pub pricelist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub gst: f64,
    pub price_with_gst: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePosBarcodePage {
    #[validate(range(min = 1, message = "must start at 1"))]
    pub page_number: u32,
    pub store_name: String,
    #[validate(nested)]
    pub products: Vec<CreatePosBarcodeProduct>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePosGeneralNote {
    #[validate(custom(function = "validate_note_date"))]
    pub date: String,
    #[validate(length(min = 1, message = "is required"))]
    pub promoter_name: String,
    #[validate(nested)]
    pub barcode_scanned_pages: Vec<CreatePosBarcodePage>,
    pub total_barcode_count: u64,
    pub note_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreatePosEntryRequest {
    #[validate(nested)]
    pub items: Vec<CreatePosItem>,
    #[validate(nested)]
    pub general_note: CreatePosGeneralNote,
    #[validate(length(min = 1, message = "is required"))]
    pub store_name: String,
}

/// Updates replace the whole entry.
pub type UpdatePosEntryRequest = CreatePosEntryRequest;

fn validate_note_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, NOTE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("note_date");
            err.message = Some("must be a DD-MM-YYYY date".into());
            err
        })
}

// ---------------------------------------------------------------------------
// Retrieval rows
// ---------------------------------------------------------------------------

/// One flattened POS line as served by the retrieval endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosRetrievalEntry {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub general_note: Option<String>,
    pub store_name: String,
    pub ykey: String,
    pub product_name: String,
    pub unit_of_measurement: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(alias = "taxes")]
    pub gst_percentage: f64,
    pub price_excluding_tax: f64,
    pub price_including_tax: f64,
    #[serde(default)]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosRetrievalDownload {
    pub data: Vec<PosRetrievalEntry>,
    pub total: u64,
    #[serde(default)]
    pub downloaded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosRetrievalStores {
    pub stores: Vec<String>,
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

pub struct PosEntries;

impl Resource for PosEntries {
    type Item = PosEntry;
    type Detail = PosEntryDetail;
    type Id = String;

    const PATH: &'static str = "pos-entries";
    const SINGULAR: &'static str = "POS entry";
    const PLURAL: &'static str = "POS entries";
    const PAGINATION: PaginationStyle = PaginationStyle::PageNumber;
    const ITEMS_KEY: Option<&'static str> = Some("entries");
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const FILTERS: &'static [&'static str] = &["store_name", "promoter_name"];

    fn id_of(item: &PosEntry) -> String {
        item.id.clone()
    }
}

impl MutableResource for PosEntries {
    type Create = CreatePosEntryRequest;
    type Update = UpdatePosEntryRequest;
    type Saved = PosEntryDetail;
}

/// Read-only paginated view over retrieval rows.
pub struct PosRetrieval;

impl Resource for PosRetrieval {
    type Item = PosRetrievalEntry;
    type Detail = PosRetrievalEntry;
    type Id = String;

    const PATH: &'static str = "pos-retrieval";
    const SINGULAR: &'static str = "POS data";
    const PLURAL: &'static str = "POS data";
    const PAGINATION: PaginationStyle = PaginationStyle::PageNumber;
    const ITEMS_KEY: Option<&'static str> = Some("data");
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const FILTERS: &'static [&'static str] = &["store_name"];

    fn id_of(item: &PosRetrievalEntry) -> String {
        item.id.clone()
    }
}

impl CsvDownload for PosRetrieval {
    type Envelope = PosRetrievalDownload;
    type Row = PosRetrievalEntry;

    const LABEL: &'static str = "POS data";
    const FILE_PREFIX: &'static str = "pos_data";

    fn endpoint(query: &DownloadQuery) -> Result<DownloadEndpoint, CoreError> {
        query.scope.validate()?;
        let (path, mut params) = match query.scope {
            DateScope::All => ("pos-retrieval/download/all", Vec::new()),
            DateScope::Day(date) => (
                "pos-retrieval/download/by-date",
                vec![("date".to_string(), date.to_string())],
            ),
            DateScope::Range { start, end } => (
                "pos-retrieval/download/date-range",
                vec![
                    ("start_date".to_string(), start.to_string()),
                    ("end_date".to_string(), end.to_string()),
                ],
            ),
        };
        if let Some(store) = &query.store_name {
            params.push(("store_name".to_string(), store.clone()));
        }
        Ok(DownloadEndpoint {
            path: path.to_string(),
            query: params,
        })
    }

    fn total(envelope: &PosRetrievalDownload) -> u64 {
        envelope.total
    }

    fn into_rows(envelope: PosRetrievalDownload) -> Vec<PosRetrievalEntry> {
        envelope.data
    }

    fn columns() -> Vec<CsvColumn<PosRetrievalEntry>> {
        vec![
            CsvColumn::plain("ID", |r: &PosRetrievalEntry| r.id.clone()),
            CsvColumn::plain("Date", |r: &PosRetrievalEntry| r.date.clone()),
            CsvColumn::plain("Store Name", |r: &PosRetrievalEntry| r.store_name.clone()),
            CsvColumn::plain("YKey", |r: &PosRetrievalEntry| r.ykey.clone()),
            CsvColumn::plain("Product Name", |r: &PosRetrievalEntry| r.product_name.clone()),
            CsvColumn::plain("Unit", |r: &PosRetrievalEntry| r.unit_of_measurement.clone()),
            CsvColumn::plain("Quantity", |r: &PosRetrievalEntry| number(r.quantity)),
            CsvColumn::plain("Unit Price", |r: &PosRetrievalEntry| number(r.unit_price)),
            CsvColumn::plain("Taxes", |r: &PosRetrievalEntry| number(r.gst_percentage)),
            CsvColumn::plain("Price Excl. Tax", |r: &PosRetrievalEntry| {
                number(r.price_excluding_tax)
            }),
            CsvColumn::plain("Price Incl. Tax", |r: &PosRetrievalEntry| {
                number(r.price_including_tax)
            }),
            CsvColumn::text("General Note", |r: &PosRetrievalEntry| {
                r.general_note.clone().unwrap_or_default()
            }),
            CsvColumn::plain("Created At", |r: &PosRetrievalEntry| r.created_at.clone()),
        ]
    }
}
