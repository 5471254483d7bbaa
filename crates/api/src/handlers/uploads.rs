//! Multipart CSV uploads, re-sent to the backend as multipart.

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use backoffice_core::resource::CsvUploadResource;
use reqwest::multipart::{Form, Part};

use crate::error::{AppError, AppResult};
use crate::proxy::{Proxied, Success};
use crate::state::AppState;

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Pull the `file` field out of the incoming form.
async fn read_file_field(mut multipart: Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::BadRequest("No file provided".into()))
}

async fn forward<R: Proxied + CsvUploadResource>(
    state: &AppState,
    headers: &HeaderMap,
    endpoint: &str,
    multipart: Multipart,
) -> AppResult<Response> {
    let file = read_file_field(multipart).await?;
    tracing::info!(
        resource = R::PLURAL,
        endpoint,
        file_name = %file.file_name,
        size = file.bytes.len(),
        "Forwarding CSV upload"
    );

    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = &file.content_type {
        part = part
            .mime_str(mime)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {e}")))?;
    }
    let form = Form::new().part("file", part);

    let url = state.backend.url(R::PATH, &[endpoint]);
    let builder = state
        .backend
        .request(Method::POST, url, headers)
        .multipart(form);
    state
        .backend
        .relay(builder, "upload CSV file", Success::Ok)
        .await
}

/// POST /api/<path>/upload-csv
pub async fn upload_csv<R: Proxied + CsvUploadResource>(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Response> {
    forward::<R>(&state, &headers, R::UPLOAD_PATH, multipart).await
}

/// POST /api/<path>/update-csv
pub async fn update_csv<R: Proxied + CsvUploadResource>(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Response> {
    let endpoint = R::UPDATE_UPLOAD_PATH.ok_or_else(|| {
        AppError::BadRequest(format!("{} has no update upload", R::PLURAL))
    })?;
    forward::<R>(&state, &headers, endpoint, multipart).await
}
