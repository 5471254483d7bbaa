//! Stock-take variance report.

use serde::{Deserialize, Serialize};

use crate::csv_export::{number, CsvColumn, CsvDownload, DateScope, DownloadEndpoint, DownloadQuery};
use crate::error::CoreError;
use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockVarianceEntry {
    /// Present when the backend reports per-row stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub product: String,
    pub unit_of_measure: String,
    pub ykey: String,
    pub open_qty: f64,
    pub close_qty: f64,
    pub difference_qty: f64,
    pub pos_total_sale: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockVarianceReport {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    pub data: Vec<StockVarianceEntry>,
    pub total: u64,
    #[serde(default)]
    pub downloaded_at: Timestamp,
}

/// A report row with its store resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StockVarianceRow {
    pub store_name: String,
    pub entry: StockVarianceEntry,
}

pub struct StockVariance;

impl CsvDownload for StockVariance {
    type Envelope = StockVarianceReport;
    type Row = StockVarianceRow;

    const LABEL: &'static str = "stock variance report";
    const FILE_PREFIX: &'static str = "stock_variance";

    fn endpoint(query: &DownloadQuery) -> Result<DownloadEndpoint, CoreError> {
        query.scope.validate()?;
        match query.scope {
            DateScope::All => Ok(DownloadEndpoint {
                path: "stock-takes/variance-report/download".into(),
                query: Vec::new(),
            }),
            // The report covers whole days.
            DateScope::Range { start, end } => Ok(DownloadEndpoint {
                path: "stock-takes/variance-report/download/date-range".into(),
                query: vec![
                    ("start_date".into(), format!("{start}T00:00:00")),
                    ("end_date".into(), format!("{end}T23:59:59")),
                ],
            }),
            DateScope::Day(_) => Err(CoreError::Validation(
                "stock variance reports are downloaded in full or by date range".into(),
            )),
        }
    }

    fn total(report: &StockVarianceReport) -> u64 {
        report.total
    }

    fn into_rows(report: StockVarianceReport) -> Vec<StockVarianceRow> {
        let fallback = report.store_name;
        report
            .data
            .into_iter()
            .map(|entry| StockVarianceRow {
                store_name: entry.store_name.clone().unwrap_or_else(|| fallback.clone()),
                entry,
            })
            .collect()
    }

    fn columns() -> Vec<CsvColumn<StockVarianceRow>> {
        vec![
            CsvColumn::text("Store Name", |r: &StockVarianceRow| r.store_name.clone()),
            CsvColumn::plain("Start Date", |r: &StockVarianceRow| r.entry.start_date.clone()),
            CsvColumn::plain("End Date", |r: &StockVarianceRow| r.entry.end_date.clone()),
            CsvColumn::text("Product", |r: &StockVarianceRow| r.entry.product.clone()),
            CsvColumn::plain("Unit of Measure", |r: &StockVarianceRow| {
                r.entry.unit_of_measure.clone()
            }),
            CsvColumn::plain("YKey", |r: &StockVarianceRow| r.entry.ykey.clone()),
            CsvColumn::plain("Open Qty", |r: &StockVarianceRow| number(r.entry.open_qty)),
            CsvColumn::plain("Close Qty", |r: &StockVarianceRow| number(r.entry.close_qty)),
            CsvColumn::plain("Difference Qty", |r: &StockVarianceRow| {
                number(r.entry.difference_qty)
            }),
            CsvColumn::plain("POS Total Sale", |r: &StockVarianceRow| {
                number(r.entry.pos_total_sale)
            }),
            CsvColumn::plain("Variance", |r: &StockVarianceRow| number(r.entry.variance)),
        ]
    }
}
