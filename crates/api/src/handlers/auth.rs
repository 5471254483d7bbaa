//! Handler for `/auth/login`.

use axum::extract::State;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use backoffice_core::envelope::parse_error_body;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body sent to the backend's shop login.
#[derive(Debug, Serialize)]
struct ShopLogin<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ShopToken {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Exchanges a username (the shop email) and password for a bearer token.
/// A rejected login relays the backend status with
/// `{"error": <detail> | "Invalid credentials"}`.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    const ACTION: &str = "log in";

    let url = state.backend.url("shops/login", &[]);
    let response = state
        .backend
        .request(Method::POST, url, &HeaderMap::new())
        .json(&ShopLogin {
            email: &input.username,
            password: &input.password,
        })
        .send()
        .await
        .map_err(|e| AppError::upstream(ACTION, e))?;

    let status = response.status();
    if !status.is_success() {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::upstream(ACTION, e))?;
        let body = parse_error_body(&bytes);
        let message = body
            .get("detail")
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or("Invalid credentials");
        tracing::info!(%status, username = %input.username, "Login rejected");
        return Ok((status, Json(json!({ "error": message }))).into_response());
    }

    let token: ShopToken = response
        .json()
        .await
        .map_err(|e| AppError::upstream(ACTION, e))?;
    tracing::info!(username = %input.username, "Login succeeded");

    Ok(Json(LoginResponse {
        token: token.access_token,
        token_type: token
            .token_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "bearer".into()),
        user_id: input.username,
    })
    .into_response())
}
