//! Bulk transfer: CSV files in and out of the console.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use backoffice_core::bulk::BulkTransferResult;
use backoffice_core::csv_export::{export_filename, to_csv, CsvDownload, DownloadQuery};
use backoffice_core::resource::CsvUploadResource;
use chrono::{NaiveDate, Utc};

use crate::error::ClientError;
use crate::resource_client::{ResourceClient, UploadMode};
use crate::transport::ApiTransport;

/// Read a CSV file from disk and upload it. Not retried.
pub async fn upload_csv_file<R: CsvUploadResource>(
    client: &ResourceClient<R>,
    mode: UploadMode,
    path: &Path,
) -> Result<BulkTransferResult, ClientError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    let contents = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        action: format!("read {}", path.display()),
        source,
    })?;
    client.upload_csv(mode, &file_name, contents).await
}

/// A finished CSV download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub path: PathBuf,
    /// Record count reported by the server.
    pub total: u64,
    pub rows_written: usize,
}

impl DownloadReport {
    pub fn summary(&self) -> String {
        format!("Downloaded {} records successfully", self.total)
    }
}

#[derive(Clone)]
pub struct Downloader {
    transport: Arc<ApiTransport>,
}

impl Downloader {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch a report and render it as CSV text, with the server's total.
    pub async fn fetch_csv<D: CsvDownload>(
        &self,
        query: &DownloadQuery,
    ) -> Result<(u64, String), ClientError> {
        let envelope = self.fetch::<D>(query).await?;
        let total = D::total(&envelope);
        Ok((total, D::render(envelope)))
    }

    /// Fetch a report and write it to `dir` under its export filename.
    /// An empty report produces an empty file.
    pub async fn download_to<D: CsvDownload>(
        &self,
        query: &DownloadQuery,
        dir: &Path,
    ) -> Result<DownloadReport, ClientError> {
        self.download_dated::<D>(query, dir, Utc::now().date_naive())
            .await
    }

    /// [`Downloader::download_to`] with an explicit date for `_all_` names.
    pub async fn download_dated<D: CsvDownload>(
        &self,
        query: &DownloadQuery,
        dir: &Path,
        today: NaiveDate,
    ) -> Result<DownloadReport, ClientError> {
        let envelope = self.fetch::<D>(query).await?;
        let total = D::total(&envelope);
        let (rows_written, csv) = {
            let rows = D::into_rows(envelope);
            (rows.len(), to_csv(&rows, &D::columns()))
        };

        let path = dir.join(export_filename(D::FILE_PREFIX, &query.scope, today));
        tokio::fs::write(&path, csv)
            .await
            .map_err(|source| ClientError::Io {
                action: format!("write {}", path.display()),
                source,
            })?;

        tracing::info!(
            report = D::LABEL,
            path = %path.display(),
            total,
            rows_written,
            "CSV download written"
        );
        Ok(DownloadReport {
            path,
            total,
            rows_written,
        })
    }

    async fn fetch<D: CsvDownload>(&self, query: &DownloadQuery) -> Result<D::Envelope, ClientError> {
        let endpoint = D::endpoint(query)?;
        let url = self.transport.url(&endpoint.path);
        let builder = self.transport.read(url).query(&endpoint.query);
        self.transport
            .send_json(builder, &format!("download {}", D::LABEL))
            .await
    }
}
