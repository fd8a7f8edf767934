//! Application state shared across handlers

use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// The store handle is built once at startup and handed to every handler;
/// each request borrows a pooled connection only while it runs.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }
}
