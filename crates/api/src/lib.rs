//! Back-office console API server library.
//!
//! A pass-through proxy in front of the backend service. Exposes config,
//! state, error handling, and routes so integration tests and the binary
//! entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod proxy;
pub mod router;
pub mod routes;
pub mod state;
