use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, created once at startup.
    pub pool: fabula_db::DbPool,
    /// Immutable server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Mount prefix used when building hypermedia links.
    pub fn prefix(&self) -> &str {
        &self.config.api_prefix
    }
}
