//! bankd — minimal banking REST API.
//!
//! Library crate so integration tests in `tests/` can build the router
//! against the in-memory store.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod store;

use middleware::auth::TokenSigner;
use store::AccountStore;

/// Shared application state passed to handlers and middleware.
/// The signer carries the injected secret and token TTL; nothing else
/// from the configuration is needed per-request.
pub struct AppState {
    pub db: Arc<dyn AccountStore>,
    pub signer: TokenSigner,
}
