//! In-process mock of the console API for client tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use backoffice_client::{ClientConfig, ConsoleClient};
use backoffice_core::session::{MemorySessionStore, Session};

pub const TOKEN: &str = "tok-123";
pub const USER_ID: &str = "admin@store.example";

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Recorded>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Recorded {
        self.0.lock().unwrap().last().cloned().expect("no requests recorded")
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    log.0.lock().unwrap().push(Recorded {
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

/// Serve `routes` under `/api` on an ephemeral port.
pub async fn spawn_backend(routes: Router) -> (String, RequestLog) {
    let log = RequestLog::default();
    let app = Router::new()
        .nest("/api", routes)
        .layer(middleware::from_fn_with_state(log.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), log)
}

pub fn signed_in_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(
        &Session::new(USER_ID, TOKEN).unwrap(),
    ))
}

pub fn console(api_url: &str, store: Arc<MemorySessionStore>) -> ConsoleClient {
    ConsoleClient::new(&ClientConfig::with_api_url(api_url), store).unwrap()
}

pub fn shop_json(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "company": format!("Company {id}"),
        "users": "ops",
        "pos_shop_name": format!("Shop {id}"),
        "email": format!("shop{id}@store.example"),
        "created_at": "2024-06-01T00:00:00",
        "updated_at": "2024-06-01T00:00:00",
    })
}

pub fn pos_entry_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "note_date": "2024-06-01",
        "promoter_name": "Sam",
        "store_name": "Food Square",
        "total_items": 2,
        "total_barcode_pages": 1,
    })
}
