use std::sync::Arc;

use crate::config::ServerConfig;
use crate::proxy::BackendProxy;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the config is behind an `Arc` and the proxy shares one
/// pooled HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub backend: BackendProxy,
}
