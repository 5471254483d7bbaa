//! Shared HTTP plumbing: URL building, bearer auth and response checks.

use std::time::Duration;

use backoffice_core::envelope;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session_guard::SessionGuard;

/// One pooled HTTP client bound to the console API root.
pub struct ApiTransport {
    http: reqwest::Client,
    base: Url,
    guard: SessionGuard,
}

/// Whether a 401 means the session is gone. Login answers 401 for bad
/// credentials, which is an ordinary failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unauthorized {
    ExpireSession,
    Fail,
}

impl ApiTransport {
    pub fn new(config: &ClientConfig, guard: SessionGuard) -> Result<Self, ClientError> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| ClientError::Config(format!("CONSOLE_API_URL: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "CONSOLE_API_URL is not a base URL: {base}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base, guard })
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// `base` + `/`-separated path, each segment percent-encoded.
    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    /// Like [`ApiTransport::url`] with a trailing id segment, which may
    /// contain `/` or spaces.
    pub(crate) fn item_url(&self, path: &str, id: &str) -> Url {
        let mut url = self.url(path);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    /// Request with bearer auth when a session exists.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.guard.session() {
            Some(session) => builder.header(AUTHORIZATION, session.authorization_header()),
            None => builder,
        }
    }

    pub(crate) fn read(&self, url: Url) -> RequestBuilder {
        self.request(Method::GET, url)
            .header(ACCEPT, "application/json")
    }

    /// Send and check the status; the body is left unread.
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        action: &str,
        unauthorized: Unauthorized,
    ) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(|source| {
            tracing::error!(action, error = %source, "Request failed");
            ClientError::Network {
                action: action.to_string(),
                source,
            }
        })?;
        self.check(response, action, unauthorized).await
    }

    /// Send, check and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = self.send(builder, action, Unauthorized::ExpireSession).await?;
        decode(response, action).await
    }

    async fn check(
        &self,
        response: Response,
        action: &str,
        unauthorized: Unauthorized,
    ) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && unauthorized == Unauthorized::ExpireSession {
            self.guard.expire();
            return Err(ClientError::SessionExpired);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let body = envelope::parse_error_body(&bytes);
        let fallback =
            envelope::default_message(action, status.canonical_reason().unwrap_or("Unknown"));
        let message = envelope::error_message(&body, &fallback);
        tracing::warn!(action, status = status.as_u16(), %message, "Backend returned an error");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    action: &str,
) -> Result<T, ClientError> {
    let bytes = response.bytes().await.map_err(|source| ClientError::Network {
        action: action.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
        action: action.to_string(),
        source: Box::new(e),
    })
}
