#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use backoffice_api::config::ServerConfig;
use backoffice_api::proxy::BackendProxy;
use backoffice_api::router::build_app_router;
use backoffice_api::state::AppState;

pub const BEARER: &str = "Bearer tok-123";

/// Build a test `ServerConfig` pointing at `backend_url`.
pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: backend_url.to_string(),
    }
}

/// The production router and middleware stack, proxying to `backend_url`.
pub fn build_test_app(backend_url: &str) -> Router {
    let config = test_config(backend_url);
    let backend = BackendProxy::new(backend_url, Duration::from_secs(5)).unwrap();
    let state = AppState {
        config: Arc::new(config.clone()),
        backend,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Seen {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackendLog(Arc<Mutex<Vec<Seen>>>);

impl BackendLog {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Seen {
        self.0.lock().unwrap().last().cloned().expect("backend was not called")
    }
}

async fn record(State(log): State<BackendLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    log.0.lock().unwrap().push(Seen {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(String::from),
        authorization: header(AUTHORIZATION),
        accept: header(ACCEPT),
        content_type: header(CONTENT_TYPE),
        body: bytes.to_vec(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Serve `routes` under `/api` on an ephemeral port. Returns the base URL
/// (without `/api`) and the request log.
pub async fn spawn_backend(routes: Router) -> (String, BackendLog) {
    let log = BackendLog::default();
    let app = Router::new()
        .nest("/api", routes)
        .layer(middleware::from_fn_with_state(log.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

/// A base URL nothing listens on.
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: axum::http::Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

/// GET `uri` with the test bearer token.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, BEARER)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// `method` `uri` with a JSON body and the test bearer token.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, BEARER)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
