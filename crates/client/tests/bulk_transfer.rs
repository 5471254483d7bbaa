//! CSV upload and download against a mock backend.

mod common;

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::Multipart;
use axum::routing::{get, post};
use axum::{Json, Router};
use backoffice_client::bulk::upload_csv_file;
use backoffice_client::{ClientError, UploadMode};
use backoffice_core::csv_export::{DateScope, DownloadQuery};
use backoffice_core::models::{PosRetrieval, PriceConsolidatedEntries, StockVariance};
use chrono::NaiveDate;
use serde_json::json;

use common::{console, signed_in_store, spawn_backend};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn upload_response() -> serde_json::Value {
    json!({
        "created_count": 8,
        "updated_count": 2,
        "failed_count": 1,
        "errors": [{"row": 5, "error": "invalid price"}],
    })
}

fn retrieval_row(id: &str, note: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "date": "2024-06-03",
        "general_note": note,
        "store_name": "Food Square",
        "ykey": "Y1",
        "product_name": "Milk 2L",
        "unit_of_measurement": "EA",
        "quantity": 3.0,
        "unit_price": 2.5,
        "gst_percentage": 10.0,
        "price_excluding_tax": 7.5,
        "price_including_tax": 8.25,
        "created_at": "2024-06-03T09:00:00",
    })
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_surfaces_counts_and_row_errors() {
    let seen = Arc::new(Mutex::new(None::<(String, String, String)>));
    let captured = Arc::clone(&seen);
    let routes = Router::new().route(
        "/price-consolidated/upload-csv",
        post(move |mut multipart: Multipart| async move {
            let field = multipart.next_field().await.unwrap().unwrap();
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let text = field.text().await.unwrap();
            *captured.lock().unwrap() = Some((name, file_name, text));
            Json(upload_response())
        }),
    );
    let (url, log) = spawn_backend(routes).await;
    let client = console(&url, signed_in_store()).resource::<PriceConsolidatedEntries>();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "ykey,price\nY1,2.50\n").unwrap();

    let result = upload_csv_file(&client, UploadMode::Append, &path)
        .await
        .unwrap();

    assert_eq!(result.created_count, 8);
    assert_eq!(result.updated_count, 2);
    assert_eq!(result.failed_count, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 5);
    assert_eq!(result.errors[0].error, "invalid price");
    assert!(result.has_failures());

    let (name, file_name, text) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(name, "file");
    assert_eq!(file_name, "prices.csv");
    assert_eq!(text, "ykey,price\nY1,2.50\n");
    assert!(log
        .last()
        .content_type
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn update_mode_posts_to_update_endpoint() {
    let routes = Router::new().route(
        "/price-consolidated/update-csv",
        post(|| async { Json(upload_response()) }),
    );
    let (url, log) = spawn_backend(routes).await;
    let client = console(&url, signed_in_store()).resource::<PriceConsolidatedEntries>();

    client
        .upload_csv(UploadMode::Update, "prices.csv", b"ykey\nY1\n".to_vec())
        .await
        .unwrap();

    assert_eq!(log.last().path, "/api/price-consolidated/update-csv");
}

#[tokio::test]
async fn missing_upload_file_is_an_io_error() {
    let (url, log) = spawn_backend(Router::new()).await;
    let client = console(&url, signed_in_store()).resource::<PriceConsolidatedEntries>();
    let dir = tempfile::tempdir().unwrap();

    let err = upload_csv_file(&client, UploadMode::Append, &dir.path().join("nope.csv"))
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Io { .. });
    assert_eq!(log.len(), 0);
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pos_range_download_writes_named_file() {
    let routes = Router::new().route(
        "/pos-retrieval/download/date-range",
        get(|| async {
            Json(json!({
                "data": [
                    retrieval_row("r1", Some(r#"He said "hi""#)),
                    retrieval_row("r2", None),
                ],
                "total": 2,
                "downloaded_at": "2024-06-30T10:00:00",
            }))
        }),
    );
    let (url, log) = spawn_backend(routes).await;
    let downloads = console(&url, signed_in_store()).downloads();
    let dir = tempfile::tempdir().unwrap();

    let query = DownloadQuery {
        scope: DateScope::Range {
            start: date("2024-06-01"),
            end: date("2024-06-07"),
        },
        store_name: None,
    }
    .with_store("Food Square");
    let report = downloads
        .download_to::<PosRetrieval>(&query, dir.path())
        .await
        .unwrap();

    assert_eq!(report.path, dir.path().join("pos_data_2024-06-01_to_2024-06-07.csv"));
    assert_eq!(report.total, 2);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.summary(), "Downloaded 2 records successfully");
    assert_eq!(
        log.last().query.as_deref(),
        Some("start_date=2024-06-01&end_date=2024-06-07&store_name=Food+Square")
    );

    let written = std::fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID,Date,Store Name,YKey"));
    assert!(lines[1].ends_with(r#","He said ""hi""",2024-06-03T09:00:00"#));
    assert!(lines[2].ends_with(r#","",2024-06-03T09:00:00"#));
}

#[tokio::test]
async fn empty_download_writes_empty_file() {
    let routes = Router::new().route(
        "/pos-retrieval/download/all",
        get(|| async { Json(json!({"data": [], "total": 0})) }),
    );
    let (url, _log) = spawn_backend(routes).await;
    let downloads = console(&url, signed_in_store()).downloads();
    let dir = tempfile::tempdir().unwrap();

    let report = downloads
        .download_dated::<PosRetrieval>(&DownloadQuery::all(), dir.path(), date("2024-07-01"))
        .await
        .unwrap();

    assert_eq!(report.path, dir.path().join("pos_data_all_2024-07-01.csv"));
    assert_eq!(report.rows_written, 0);
    assert_eq!(std::fs::read_to_string(&report.path).unwrap(), "");
}

#[tokio::test]
async fn stock_range_download_covers_whole_days() {
    let routes = Router::new().route(
        "/stock-takes/variance-report/download/date-range",
        get(|| async {
            Json(json!({
                "store_name": "Food Square",
                "start_date": "2024-06-01T00:00:00",
                "end_date": "2024-06-07T23:59:59",
                "data": [],
                "total": 0,
            }))
        }),
    );
    let (url, log) = spawn_backend(routes).await;
    let downloads = console(&url, signed_in_store()).downloads();

    let query = DownloadQuery {
        scope: DateScope::Range {
            start: date("2024-06-01"),
            end: date("2024-06-07"),
        },
        store_name: None,
    };
    let (total, csv) = downloads.fetch_csv::<StockVariance>(&query).await.unwrap();

    assert_eq!(total, 0);
    assert_eq!(csv, "");
    assert_eq!(
        log.last().query.as_deref(),
        Some("start_date=2024-06-01T00%3A00%3A00&end_date=2024-06-07T23%3A59%3A59")
    );
}

#[tokio::test]
async fn inverted_range_is_rejected_before_any_call() {
    let (url, log) = spawn_backend(Router::new()).await;
    let downloads = console(&url, signed_in_store()).downloads();

    let query = DownloadQuery {
        scope: DateScope::Range {
            start: date("2024-06-07"),
            end: date("2024-06-01"),
        },
        store_name: None,
    };
    let result = downloads.fetch_csv::<PosRetrieval>(&query).await;

    assert_matches!(result, Err(ClientError::Invalid(_)));
    assert_eq!(log.len(), 0);
}
