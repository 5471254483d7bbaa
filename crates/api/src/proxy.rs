//! Pass-through to the backend service.
//!
//! Every proxied call goes through [`BackendProxy::relay`]:
//!
//! - 2xx: the JSON body is returned with the route's success status
//!   (200, 201, or 204 without a body).
//! - non-2xx: the backend's JSON body (or `{}`) is relayed with its status.
//! - transport failure: [`AppError::Upstream`], rendered as
//!   `500 {"error": "Failed to <action>"}`.

use std::time::Duration;

use axum::http::header::{ACCEPT, AUTHORIZATION};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use backoffice_core::envelope::parse_error_body;
use backoffice_core::models::{
    ArticleCodes, PosEntries, PosRetrieval, PriceConsolidatedEntries, PricePosMappings, Prices,
    Products, Shops, StoreProducts,
};
use backoffice_core::paging::PageRequest;
use backoffice_core::resource::Resource;
use reqwest::{RequestBuilder, Url};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Status returned to the caller when the backend call succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Success {
    Ok,
    Created,
    NoContent,
}

/// How a core resource is mounted on the backend.
pub trait Proxied: Resource {
    /// The backend's collection URL ends in `/`.
    const TRAILING_SLASH: bool = false;
    /// Send the first page when the caller gives no paging parameters.
    const DEFAULT_PAGING: bool = false;

    fn default_query() -> Vec<(String, String)> {
        if !Self::DEFAULT_PAGING {
            return Vec::new();
        }
        PageRequest::first(Self::DEFAULT_PAGE_SIZE)
            .map(|page| page.query_pairs(Self::PAGINATION))
            .unwrap_or_default()
    }
}

impl Proxied for Shops {
    const TRAILING_SLASH: bool = true;
    const DEFAULT_PAGING: bool = true;
}

impl Proxied for PosEntries {
    const DEFAULT_PAGING: bool = true;
}

impl Proxied for PosRetrieval {
    const DEFAULT_PAGING: bool = true;
}

impl Proxied for PricePosMappings {
    const TRAILING_SLASH: bool = true;
}

impl Proxied for Products {}
impl Proxied for Prices {}
impl Proxied for PriceConsolidatedEntries {}
impl Proxied for StoreProducts {}
impl Proxied for ArticleCodes {}

#[derive(Clone)]
pub struct BackendProxy {
    http: reqwest::Client,
    base: Url,
}

impl BackendProxy {
    pub fn new(backend_url: &str, timeout: Duration) -> AppResult<Self> {
        let base = Url::parse(backend_url)
            .map_err(|e| AppError::InternalError(format!("invalid backend URL '{backend_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AppError::InternalError(format!(
                "backend URL '{backend_url}' cannot carry a path"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, base })
    }

    /// `<base>/api/<path>/<tail...>`. `path` is split on `/`; each tail
    /// segment is percent-encoded as one segment.
    pub fn url(&self, path: &str, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api");
            segments.extend(path.split('/'));
            segments.extend(tail);
        }
        url
    }

    /// Collection URL of a resource, with its trailing-slash convention.
    pub fn collection_url<R: Proxied>(&self) -> Url {
        let tail: &[&str] = if R::TRAILING_SLASH { &[""] } else { &[] };
        self.url(R::PATH, tail)
    }

    /// A request carrying `accept: application/json` and the caller's
    /// `Authorization` header, if any.
    pub fn request(&self, method: Method, url: Url, headers: &HeaderMap) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = headers.get(AUTHORIZATION) {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }
        builder
    }

    pub async fn relay(
        &self,
        builder: RequestBuilder,
        action: &str,
        success: Success,
    ) -> AppResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::upstream(action, e))?;
        let status = response.status();

        if !status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| AppError::upstream(action, e))?;
            tracing::warn!(%status, action, "Backend rejected request");
            return Ok((status, Json(parse_error_body(&bytes))).into_response());
        }

        let status = match success {
            Success::NoContent => return Ok(StatusCode::NO_CONTENT.into_response()),
            Success::Ok => StatusCode::OK,
            Success::Created => StatusCode::CREATED,
        };
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::upstream(action, e))?;
        Ok((status, Json(body)).into_response())
    }
}

/// Merge the caller's query with defaults.
///
/// Empty values are dropped. Defaulted keys come first, taking the caller's
/// value when one was given.
pub fn forward_query(
    incoming: Vec<(String, String)>,
    defaults: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let given: Vec<(String, String)> = incoming
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

    let mut query: Vec<(String, String)> = defaults
        .into_iter()
        .map(|(key, default)| {
            let value = given
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or(default);
            (key, value)
        })
        .collect();

    for (key, value) in given {
        if !query.iter().any(|(k, _)| *k == key) {
            query.push((key, value));
        }
    }
    query
}

/// Values of the required parameters, in order, or the given message.
pub fn require_params(
    query: &[(String, String)],
    names: &[&str],
    message: &str,
) -> AppResult<Vec<String>> {
    names
        .iter()
        .map(|name| {
            query
                .iter()
                .find(|(k, v)| k == name && !v.trim().is_empty())
                .map(|(_, v)| v.clone())
                .ok_or_else(|| AppError::BadRequest(message.to_string()))
        })
        .collect()
}
