use std::sync::Arc;

use bookshelf_db::BookStore;

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Book persistence backend.
    pub store: Arc<dyn BookStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer token verifier. `None` when auth is not configured,
    /// in which case no route is gated.
    pub verifier: Option<Arc<dyn TokenVerifier>>,
}
