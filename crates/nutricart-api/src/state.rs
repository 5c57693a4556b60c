use std::sync::Arc;

use nutricart_engine::identity::{IdentityProvider, SqliteIdentityProvider};

use crate::database::Database;

/// Shared handler state. Holds no connection, only how to open one.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self::with_identity(db, Arc::new(SqliteIdentityProvider::new()))
    }

    pub fn with_identity(db: Database, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity }
    }
}
