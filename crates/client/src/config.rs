//! Client configuration loaded from environment variables.

/// Settings for [`crate::ConsoleClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the console API, including the `/api` prefix.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                        | Default                      |
    /// |--------------------------------|------------------------------|
    /// | `CONSOLE_API_URL`              | `http://localhost:3000/api`  |
    /// | `CONSOLE_REQUEST_TIMEOUT_SECS` | `30`                         |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("CONSOLE_API_URL").unwrap_or(defaults.api_url);

        let request_timeout_secs: u64 = std::env::var("CONSOLE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            api_url,
            request_timeout_secs,
        }
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}
