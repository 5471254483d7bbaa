//! Generic CRUD client for one backend collection.
//!
//! Every operation issues exactly one HTTP call:
//!
//! ```text
//! list          GET    /<path>?<filters>&<paging>
//! get           GET    /<path>/<id>
//! create        POST   /<path>
//! update        PUT    /<path>/<id>
//! delete        DELETE /<path>/<id>
//! bulk_create   POST   /<path>/bulk          {"entries": [...]}
//! upload_csv    POST   /<path>/upload-csv    multipart "file"
//! list_values   GET    /<path>/lists/<field>
//! stats         GET    /<path>/stats/<kind>
//! group_counts  GET    /<path>/stats/by-<field>
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use backoffice_core::bulk::{BulkCreateRequest, BulkCreateResponse, BulkTransferResult};
use backoffice_core::filters::FilterSet;
use backoffice_core::models::GroupCount;
use backoffice_core::paging::{CollectionPage, PageRequest};
use backoffice_core::resource::{
    action, check_filter, BulkResource, CsvUploadResource, MutableResource, Resource,
};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::ClientError;
use crate::transport::{ApiTransport, Unauthorized};

pub struct ResourceClient<R: Resource> {
    transport: Arc<ApiTransport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub(crate) fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    /// Fetch one page. Filter names must be known to the resource.
    pub async fn list(
        &self,
        filters: &FilterSet,
        page: PageRequest,
    ) -> Result<CollectionPage<R::Item>, ClientError> {
        for name in filters.names() {
            check_filter::<R>(name)?;
        }

        let mut query = page.query_pairs(R::PAGINATION);
        query.extend(filters.query_pairs());

        let action = action::<R>("fetch", true);
        tracing::debug!(
            resource = R::PLURAL,
            page = page.page(),
            page_size = page.page_size(),
            "Listing"
        );

        let builder = self.transport.read(self.transport.url(R::PATH)).query(&query);
        let body: Value = self.transport.send_json(builder, &action).await?;
        CollectionPage::from_value(body, R::ITEMS_KEY).map_err(|e| ClientError::Decode {
            action,
            source: Box::new(e),
        })
    }

    /// Convenience for `list` with raw page numbers.
    pub async fn list_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: u32,
    ) -> Result<CollectionPage<R::Item>, ClientError> {
        let page = PageRequest::new(page, page_size)?;
        self.list(filters, page).await
    }

    pub async fn get(&self, id: &R::Id) -> Result<R::Detail, ClientError> {
        let url = self.transport.item_url(R::PATH, &id.to_string());
        self.transport
            .send_json(self.transport.read(url), &action::<R>("fetch", false))
            .await
    }

    /// Distinct values of a field, for filter dropdowns.
    pub async fn list_values(&self, field: &str) -> Result<Vec<String>, ClientError> {
        let url = self.transport.url(&format!("{}/lists/{field}", R::PATH));
        self.transport
            .send_json(self.transport.read(url), &format!("fetch {field}"))
            .await
    }

    /// Aggregate statistics, e.g. `overview` or `by-state`.
    pub async fn stats<T: DeserializeOwned>(&self, kind: &str) -> Result<T, ClientError> {
        let url = self.transport.url(&format!("{}/stats/{kind}", R::PATH));
        self.transport
            .send_json(self.transport.read(url), &format!("fetch {} statistics", R::SINGULAR))
            .await
    }

    /// Row counts grouped by `field`, from `stats/by-<field>`.
    pub async fn group_counts(&self, field: &str) -> Result<Vec<GroupCount>, ClientError> {
        self.stats(&format!("by-{field}")).await
    }
}

impl<R: MutableResource> ResourceClient<R> {
    /// Validate and create. Invalid payloads never reach the network.
    pub async fn create(&self, data: &R::Create) -> Result<R::Saved, ClientError> {
        data.validate()?;
        let builder = self
            .transport
            .request(Method::POST, self.transport.url(R::PATH))
            .json(data);
        let saved = self
            .transport
            .send_json(builder, &action::<R>("create", false))
            .await?;
        tracing::info!(resource = R::SINGULAR, "Created");
        Ok(saved)
    }

    pub async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R::Saved, ClientError> {
        data.validate()?;
        let url = self.transport.item_url(R::PATH, &id.to_string());
        let builder = self.transport.request(Method::PUT, url).json(data);
        let saved = self
            .transport
            .send_json(builder, &action::<R>("update", false))
            .await?;
        tracing::info!(resource = R::SINGULAR, id = %id, "Updated");
        Ok(saved)
    }

    /// 204 and any other 2xx count as success; the body is ignored.
    pub async fn delete(&self, id: &R::Id) -> Result<(), ClientError> {
        let url = self.transport.item_url(R::PATH, &id.to_string());
        let builder = self
            .transport
            .request(Method::DELETE, url)
            .header(ACCEPT, "*/*");
        self.transport
            .send(builder, &action::<R>("delete", false), Unauthorized::ExpireSession)
            .await?;
        tracing::info!(resource = R::SINGULAR, id = %id, "Deleted");
        Ok(())
    }
}

impl<R: BulkResource> ResourceClient<R> {
    /// Create many rows in one call. Every entry is validated first.
    pub async fn bulk_create(&self, entries: &[R::Create]) -> Result<BulkCreateResponse, ClientError> {
        for entry in entries {
            entry.validate()?;
        }
        let url = self.transport.url(&format!("{}/{}", R::PATH, R::BULK_PATH));
        let body = BulkCreateRequest {
            entries: entries.to_vec(),
        };
        let builder = self.transport.request(Method::POST, url).json(&body);
        let response: BulkCreateResponse = self
            .transport
            .send_json(builder, &format!("bulk create {}", R::PLURAL))
            .await?;
        tracing::info!(
            resource = R::PLURAL,
            created = response.created_count,
            updated = response.updated_count,
            failed = response.failed_count,
            "Bulk create finished"
        );
        Ok(response)
    }
}

/// Which CSV endpoint to post to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Append,
    Update,
}

impl<R: CsvUploadResource> ResourceClient<R> {
    /// Upload a CSV file as the single multipart field `file`. The
    /// multipart boundary header is left to the HTTP client.
    pub async fn upload_csv(
        &self,
        mode: UploadMode,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkTransferResult, ClientError> {
        let endpoint = match mode {
            UploadMode::Append => R::UPLOAD_PATH,
            UploadMode::Update => R::UPDATE_UPLOAD_PATH.ok_or_else(|| {
                ClientError::Config(format!("{} has no update upload endpoint", R::PLURAL))
            })?,
        };

        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let url = self.transport.url(&format!("{}/{endpoint}", R::PATH));
        let builder = self.transport.request(Method::POST, url).multipart(form);

        let result: BulkTransferResult = self
            .transport
            .send_json(builder, "upload CSV file")
            .await?;
        tracing::info!(
            resource = R::PLURAL,
            file_name,
            created = result.created_count,
            updated = result.updated_count,
            failed = result.failed_count,
            "CSV upload processed"
        );
        Ok(result)
    }
}
