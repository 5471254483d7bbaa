//! List and CRUD panels driven end to end against a mock backend.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use backoffice_client::{FetchOutcome, RedirectReason, SubmitOutcome};
use backoffice_core::list_controller::ListStatus;
use backoffice_core::models::pos::PosEntries;
use backoffice_core::models::shop::{CreateShopRequest, Shops};
use backoffice_core::mutation::Modal;
use backoffice_core::session::MemorySessionStore;
use serde_json::json;

use common::{console, pos_entry_json, shop_json, signed_in_store, spawn_backend};

/// POS entries backend: 57 rows, one row per page named after the page.
/// Page 2 answers slowly.
fn pos_entries_backend() -> Router {
    Router::new()
        .route(
            "/pos-entries",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let page = q.get("page").cloned().unwrap_or_else(|| "1".into());
                if page == "2" {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                }
                Json(json!({
                    "entries": [pos_entry_json(&format!("page-{page}"))],
                    "total": 57,
                }))
            }),
        )
        .route(
            "/pos-entries/{id}",
            delete(|| async { StatusCode::NO_CONTENT }),
        )
}

// ---------------------------------------------------------------------------
// List panel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_on_page_three_resets_to_page_one() {
    let (url, log) = spawn_backend(pos_entries_backend()).await;
    let panel = console(&url, signed_in_store())
        .list_panel::<PosEntries>()
        .unwrap();

    panel.set_page(3).await.unwrap();
    assert_eq!(panel.view(|l| l.current_page()), 3);

    let outcome = panel.set_filter("store_name", "Food Square").await.unwrap();

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(panel.view(|l| l.current_page()), 1);
    assert_eq!(
        log.last().query.as_deref(),
        Some("page=1&page_size=10&store_name=Food+Square")
    );
}

#[tokio::test]
async fn late_response_never_overwrites_newer_state() {
    let (url, _log) = spawn_backend(pos_entries_backend()).await;
    let panel = console(&url, signed_in_store())
        .list_panel::<PosEntries>()
        .unwrap();

    // Page 2 is issued first but resolves after page 3.
    let (slow, fast) = tokio::join!(panel.set_page(2), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        panel.set_page(3).await
    });

    assert_eq!(fast.unwrap(), FetchOutcome::Applied);
    assert_eq!(slow.unwrap(), FetchOutcome::Stale);
    panel.view(|l| {
        assert_eq!(l.current_page(), 3);
        assert_eq!(l.items()[0].id, "page-3");
        assert_eq!(l.status(), ListStatus::Ready);
    });
}

#[tokio::test]
async fn failed_fetch_keeps_items_and_records_error() {
    let routes = Router::new().route(
        "/shops",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            if q.get("skip").map(String::as_str) == Some("0") {
                (StatusCode::OK, Json(json!([shop_json(1)])))
            } else {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"error": "Failed to fetch shops"})),
                )
            }
        }),
    );
    let (url, _log) = spawn_backend(routes).await;
    let panel = console(&url, signed_in_store()).list_panel::<Shops>().unwrap();

    panel.load().await.unwrap();
    panel.set_page_size(1).await.unwrap();
    // Page 2 of a 1-row result fails upstream.
    panel.set_page(2).await.unwrap();

    panel.view(|l| {
        assert_eq!(l.status(), ListStatus::Error);
        assert_eq!(l.error(), Some("Failed to fetch shops"));
        assert_eq!(l.items().len(), 1);
    });
}

#[tokio::test]
async fn unauthorized_list_abandons_fetch() {
    let routes = Router::new().route(
        "/pos-entries",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let (url, _log) = spawn_backend(routes).await;
    let store = signed_in_store();
    let console = console(&url, store.clone());
    let mut redirects = console.guard().subscribe();
    let panel = console.list_panel::<PosEntries>().unwrap();

    let outcome = panel.load().await.unwrap();

    assert_eq!(outcome, FetchOutcome::SessionExpired);
    panel.view(|l| {
        assert_eq!(l.status(), ListStatus::Loading);
        assert_eq!(l.error(), None);
    });
    assert_eq!(
        redirects.try_recv().unwrap().reason,
        RedirectReason::SessionExpired
    );
}

#[tokio::test]
async fn panels_require_a_session() {
    let (url, log) = spawn_backend(pos_entries_backend()).await;
    let console = console(&url, Arc::new(MemorySessionStore::new()));
    let mut redirects = console.guard().subscribe();

    assert!(console.crud_panel::<PosEntries>().is_none());
    assert_eq!(
        redirects.try_recv().unwrap().reason,
        RedirectReason::MissingSession
    );
    assert_eq!(log.len(), 0);
}

// ---------------------------------------------------------------------------
// CRUD panel
// ---------------------------------------------------------------------------

fn shops_backend(create_status: StatusCode, create_body: serde_json::Value) -> Router {
    Router::new().route(
        "/shops",
        get(|| async { Json(json!([shop_json(1), shop_json(2)])) })
            .post(move || async move { (create_status, Json(create_body)) }),
    )
}

fn fill(form: &mut CreateShopRequest) {
    form.company = "Acme".into();
    form.users = "alice".into();
    form.pos_shop_name = "Acme Central".into();
    form.email = "ops@acme.example".into();
    form.password = "secret".into();
}

#[tokio::test]
async fn create_failure_keeps_modal_open_with_backend_message() {
    let (url, log) = spawn_backend(shops_backend(
        StatusCode::BAD_REQUEST,
        json!({"detail": "email already exists"}),
    ))
    .await;
    let panel = console(&url, signed_in_store()).crud_panel::<Shops>().unwrap();

    panel.open_create();
    panel.edit_create_form(fill);
    let outcome = panel.submit_create().await;

    assert_eq!(outcome, SubmitOutcome::Failed("email already exists".into()));
    panel.dialogs(|d| {
        assert_eq!(d.modal(), &Modal::Create);
        assert_eq!(d.create_error(), Some("email already exists"));
        assert_eq!(d.create_form().company, "Acme");
    });
    // Only the POST; the list was not re-fetched.
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn create_success_closes_modal_and_returns_to_first_page() {
    let (url, log) = spawn_backend(shops_backend(StatusCode::CREATED, shop_json(3))).await;
    let panel = console(&url, signed_in_store()).crud_panel::<Shops>().unwrap();

    panel.open_create();
    panel.edit_create_form(fill);
    let outcome = panel.submit_create().await;

    assert_eq!(outcome, SubmitOutcome::Completed);
    panel.dialogs(|d| {
        assert_eq!(d.modal(), &Modal::Closed);
        assert_eq!(d.create_form(), &CreateShopRequest::default());
    });
    let requests = log.all();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].query.as_deref(), Some("skip=0&limit=300"));
    assert_eq!(panel.list().view(|l| l.items().len()), 2);
}

#[tokio::test]
async fn delete_cancel_issues_no_call_and_confirm_exactly_one() {
    let (url, log) = spawn_backend(pos_entries_backend()).await;
    let panel = console(&url, signed_in_store())
        .crud_panel::<PosEntries>()
        .unwrap();

    assert!(panel.request_delete("abc123".into()));
    panel.cancel_delete();
    assert_eq!(panel.confirm_delete().await, SubmitOutcome::NothingToSubmit);
    assert_eq!(log.len(), 0);

    panel.request_delete("abc123".into());
    assert_eq!(panel.confirm_delete().await, SubmitOutcome::Completed);

    let requests = log.all();
    let deletes: Vec<_> = requests.iter().filter(|r| r.method == "DELETE").collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, "/api/pos-entries/abc123");
    // Followed by a re-fetch of the current page.
    assert_matches!(requests.last(), Some(r) if r.method == "GET");
    panel.dialogs(|d| assert!(d.pending_delete().is_none()));
}

#[tokio::test]
async fn delete_listed_row_uses_its_id() {
    let (url, log) = spawn_backend(pos_entries_backend()).await;
    let panel = console(&url, signed_in_store())
        .crud_panel::<PosEntries>()
        .unwrap();
    panel.list().load().await.unwrap();

    let row = panel.list().view(|l| l.items()[0].clone());
    assert!(panel.request_delete_item(&row));
    assert_eq!(panel.confirm_delete().await, SubmitOutcome::Completed);

    let requests = log.all();
    let delete = requests.iter().find(|r| r.method == "DELETE").unwrap();
    assert_eq!(delete.path, "/api/pos-entries/page-1");
}

#[tokio::test]
async fn submit_create_without_open_dialog_sends_nothing() {
    let (url, log) = spawn_backend(shops_backend(StatusCode::CREATED, shop_json(3))).await;
    let panel = console(&url, signed_in_store()).crud_panel::<Shops>().unwrap();

    panel.edit_create_form(fill);

    assert_eq!(panel.submit_create().await, SubmitOutcome::NothingToSubmit);
    assert_eq!(log.len(), 0);
}
