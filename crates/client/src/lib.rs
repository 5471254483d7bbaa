//! Async client for the back-office console API.
//!
//! [`ConsoleClient`] owns one pooled HTTP client and the [`SessionGuard`];
//! per-resource clients, panels and the CSV downloader all share it.

pub mod auth;
pub mod bulk;
pub mod catalog;
pub mod config;
pub mod error;
pub mod panel;
pub mod resource_client;
pub mod session_guard;
pub mod transport;

use std::sync::Arc;

use backoffice_core::resource::{MutableResource, Resource};
use backoffice_core::session::SessionStore;

pub use auth::AuthClient;
pub use bulk::{DownloadReport, Downloader};
pub use config::ClientConfig;
pub use error::ClientError;
pub use panel::{CrudPanel, FetchOutcome, ListPanel, SubmitOutcome};
pub use resource_client::{ResourceClient, UploadMode};
pub use session_guard::{Redirect, RedirectReason, SessionGuard, LOGIN_ROUTE};
pub use transport::ApiTransport;

#[derive(Clone)]
pub struct ConsoleClient {
    transport: Arc<ApiTransport>,
}

impl ConsoleClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let guard = SessionGuard::new(store);
        let transport = ApiTransport::new(config, guard)?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    pub fn guard(&self) -> &SessionGuard {
        self.transport.guard()
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(Arc::clone(&self.transport))
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(Arc::clone(&self.transport))
    }

    pub fn downloads(&self) -> Downloader {
        Downloader::new(Arc::clone(&self.transport))
    }

    /// A read-only list panel, or `None` (and a login redirect) without a
    /// session.
    pub fn list_panel<R: Resource>(&self) -> Option<ListPanel<R>> {
        self.guard().require()?;
        Some(ListPanel::new(self.resource()))
    }

    /// A list panel with create/edit/delete dialogs, gated like
    /// [`ConsoleClient::list_panel`].
    pub fn crud_panel<R: MutableResource>(&self) -> Option<CrudPanel<R>> {
        self.guard().require()?;
        Some(CrudPanel::new(self.resource()))
    }
}
