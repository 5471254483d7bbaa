//! Route builders shared by every proxied resource.

use axum::routing::{get, post};
use axum::Router;
use backoffice_core::resource::CsvUploadResource;

use crate::handlers::{resources, uploads};
use crate::proxy::Proxied;
use crate::state::AppState;

fn collection<R: Proxied>() -> String {
    format!("/{}", R::PATH)
}

/// ```text
/// GET    /<path>        -> list
/// POST   /<path>        -> create
/// GET    /<path>/{id}   -> get
/// PUT    /<path>/{id}   -> update
/// DELETE /<path>/{id}   -> delete
/// ```
pub fn crud<R: Proxied>() -> Router<AppState> {
    let path = collection::<R>();
    Router::new()
        .route(
            &path,
            get(resources::list::<R>).post(resources::create::<R>),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(resources::get::<R>)
                .put(resources::update::<R>)
                .delete(resources::delete::<R>),
        )
}

/// `GET /<path>` and `GET /<path>/{id}` only.
pub fn read_only<R: Proxied>() -> Router<AppState> {
    let path = collection::<R>();
    Router::new()
        .route(&path, get(resources::list::<R>))
        .route(&format!("{path}/{{id}}"), get(resources::get::<R>))
}

/// `GET /<path>/lists/{field}` and `GET /<path>/stats/{kind}`.
pub fn lookups<R: Proxied>() -> Router<AppState> {
    let path = collection::<R>();
    Router::new()
        .route(
            &format!("{path}/lists/{{field}}"),
            get(resources::list_values::<R>),
        )
        .route(
            &format!("{path}/stats/{{kind}}"),
            get(resources::stats::<R>),
        )
}

/// `POST /<path>/bulk`, forwarded unchanged.
pub fn bulk<R: Proxied>() -> Router<AppState> {
    Router::new().route(
        &format!("{}/bulk", collection::<R>()),
        post(resources::bulk_create::<R>),
    )
}

/// `POST /<path>/<upload>` and, when offered, `POST /<path>/<update>`.
pub fn csv_uploads<R: Proxied + CsvUploadResource>() -> Router<AppState> {
    let path = collection::<R>();
    let router = Router::new().route(
        &format!("{path}/{}", R::UPLOAD_PATH),
        post(uploads::upload_csv::<R>),
    );
    match R::UPDATE_UPLOAD_PATH {
        Some(update) => router.route(
            &format!("{path}/{update}"),
            post(uploads::update_csv::<R>),
        ),
        None => router,
    }
}
