//! Login against the console API.

use std::sync::Arc;

use backoffice_core::session::Session;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::transport::{decode, ApiTransport, Unauthorized};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<ApiTransport>,
}

impl AuthClient {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a token and store the session.
    ///
    /// A 401 here is a wrong password, not an expired session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Invalid(
                backoffice_core::error::CoreError::Validation(
                    "username and password are required".into(),
                ),
            ));
        }

        let url = self.transport.url("auth/login");
        let builder = self
            .transport
            .request(Method::POST, url)
            .json(&LoginRequest { username, password });
        let response = self
            .transport
            .send(builder, "log in", Unauthorized::Fail)
            .await?;
        let login: LoginResponse = decode(response, "log in").await?;

        let session = Session::new(login.user_id, login.token)?;
        self.transport.guard().sign_in(&session)?;
        Ok(session)
    }

    pub fn logout(&self) {
        self.transport.guard().logout();
    }
}
