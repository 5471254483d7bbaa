use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use backoffice_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Errors relayed from the backend never pass through here: their bodies
/// are forwarded unchanged by [`crate::proxy::BackendProxy`]. This type
/// covers what the proxy itself rejects or fails at.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `backoffice_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The backend could not be reached or sent an unreadable success body.
    #[error("Failed to {action}")]
    Upstream {
        action: String,
        #[source]
        source: reqwest::Error,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn upstream(action: &str, source: reqwest::Error) -> Self {
        AppError::Upstream {
            action: action.to_string(),
            source,
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UnknownFilter { .. } => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
                CoreError::Malformed(_) | CoreError::SessionStore(_) => {
                    tracing::error!(error = %core, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            AppError::Upstream { action, source } => {
                tracing::error!(action = %action, error = %source, "Backend call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("Failed to {action}"),
                )
            }

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
