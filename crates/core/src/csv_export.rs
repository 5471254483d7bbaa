//! Client-side CSV serialization for report downloads.
//!
//! Exports use a fixed header row and comma-joined values. Free-text
//! columns are always wrapped in quotes with inner quotes doubled; any other
//! value is quoted the same way only when it contains a quote. Commas and
//! line breaks in non-text columns are written as-is.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Columns and serialization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Quote only if the value contains `"`.
    AsNeeded,
    /// Always quote (free-text fields).
    Always,
}

pub struct CsvColumn<T> {
    pub header: &'static str,
    pub quoting: Quoting,
    pub value: fn(&T) -> String,
}

impl<T> CsvColumn<T> {
    pub const fn plain(header: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            header,
            quoting: Quoting::AsNeeded,
            value,
        }
    }

    pub const fn text(header: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            header,
            quoting: Quoting::Always,
            value,
        }
    }
}

/// Wrap in quotes, doubling inner quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn encode_field(value: &str, quoting: Quoting) -> String {
    match quoting {
        Quoting::Always => quote(value),
        Quoting::AsNeeded if value.contains('"') => quote(value),
        Quoting::AsNeeded => value.to_string(),
    }
}

/// Serialize rows under a header line. No rows produces an empty string.
pub fn to_csv<T>(rows: &[T], columns: &[CsvColumn<T>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| c.header)
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|c| encode_field(&(c.value)(row), c.quoting))
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Render a number the way the console displays it (`3`, `12.5`).
pub fn number(value: f64) -> String {
    value.to_string()
}

pub fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Download scope and filenames
// ---------------------------------------------------------------------------

/// Date filter applied to a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    All,
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateScope {
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            DateScope::Range { start, end } if end < start => Err(CoreError::Validation(
                format!("start date {start} is after end date {end}"),
            )),
            _ => Ok(()),
        }
    }
}

/// `<prefix>_all_<today>.csv`, `<prefix>_<date>.csv` or
/// `<prefix>_<start>_to_<end>.csv`.
pub fn export_filename(prefix: &str, scope: &DateScope, today: NaiveDate) -> String {
    match scope {
        DateScope::All => format!("{prefix}_all_{today}.csv"),
        DateScope::Day(date) => format!("{prefix}_{date}.csv"),
        DateScope::Range { start, end } => format!("{prefix}_{start}_to_{end}.csv"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadQuery {
    pub scope: DateScope,
    pub store_name: Option<String>,
}

impl DownloadQuery {
    pub fn all() -> Self {
        Self {
            scope: DateScope::All,
            store_name: None,
        }
    }

    pub fn with_store(mut self, store_name: &str) -> Self {
        let trimmed = store_name.trim();
        self.store_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

/// Path and query for one download call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEndpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// A report that is fetched from a download endpoint and saved as CSV.
pub trait CsvDownload {
    type Envelope: DeserializeOwned + Send + 'static;
    type Row;

    /// Noun used in messages, e.g. "POS data".
    const LABEL: &'static str;
    const FILE_PREFIX: &'static str;

    fn endpoint(query: &DownloadQuery) -> Result<DownloadEndpoint, CoreError>;
    fn total(envelope: &Self::Envelope) -> u64;
    fn into_rows(envelope: Self::Envelope) -> Vec<Self::Row>;
    fn columns() -> Vec<CsvColumn<Self::Row>>;

    fn render(envelope: Self::Envelope) -> String {
        let rows = Self::into_rows(envelope);
        to_csv(&rows, &Self::columns())
    }
}
