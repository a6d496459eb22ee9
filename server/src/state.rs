//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool and the parsed server configuration. There is
//! no in-memory domain state: every request reads through Postgres so the
//! row-level security policies stay the single source of truth.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the pool is reference counted and the config
/// is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self { pool, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
