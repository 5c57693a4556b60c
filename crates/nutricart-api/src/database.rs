//! Per-request SQLite access.
//!
//! The server keeps only the path and settings; every request opens its own
//! connection on the blocking pool and drops it when done.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct Database {
    path: Arc<PathBuf>,
    busy_timeout: Duration,
}

impl Database {
    pub fn new(path: impl AsRef<Path>, busy_timeout: Duration) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            busy_timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a configured connection (foreign keys, WAL, busy timeout).
    pub fn connect(&self) -> nutricart_store::Result<Connection> {
        nutricart_store::db::open_with_timeout(self.path.as_path(), self.busy_timeout)
    }

    /// Run `f` against a fresh connection on the blocking pool.
    ///
    /// `context` becomes the `error` field of a 500 response.
    pub async fn run<F, T>(&self, context: &'static str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> nutricart_store::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut conn = db.connect()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        outcome.map_err(|source| ApiError::Engine { context, source })
    }
}
