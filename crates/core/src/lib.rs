//! Domain layer of the back-office console.
//!
//! Models, resource descriptors, the session contract, and the state
//! machines that drive list panels and their create/edit/delete dialogs.
//! None of it touches the network, which lives in `backoffice-client` and
//! `backoffice-api`. The one piece of I/O is
//! [`session::FileSessionStore`], which persists the session to a JSON file.

pub mod bulk;
pub mod csv_export;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod list_controller;
pub mod models;
pub mod mutation;
pub mod paging;
pub mod resource;
pub mod session;
pub mod types;
