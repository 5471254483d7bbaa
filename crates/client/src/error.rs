use backoffice_core::envelope::SESSION_EXPIRED_MESSAGE;
use backoffice_core::error::CoreError;

/// Errors from the console client.
///
/// `Display` is the message shown to the user, already flattened from the
/// backend error body.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered 401. The session has been cleared and a
    /// redirect to the login route signalled.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// The request never produced a response (connect, DNS, timeout).
    #[error("Failed to {action}")]
    Network {
        action: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to {action}: unexpected response from server")]
    Decode {
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Failed to {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }

    /// HTTP status of a backend failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Invalid(CoreError::from(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_flattened_message() {
        let err = ClientError::Api {
            status: 400,
            message: "email already exists".into(),
        };
        assert_eq!(err.to_string(), "email already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn session_expired_message() {
        assert_eq!(
            ClientError::SessionExpired.to_string(),
            "Session expired. Please log in again."
        );
    }

    #[test]
    fn local_validation_keeps_core_message() {
        let err = ClientError::from(CoreError::Validation("page must be at least 1".into()));
        assert_eq!(err.to_string(), "Validation failed: page must be at least 1");
    }
}
