pub mod migrate;
pub mod seed;
pub mod serve;
pub mod stats;

use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

/// Open the database and bring its schema up to date.
pub fn open_migrated(db: &Path) -> anyhow::Result<Connection> {
    let mut conn = nutricart_store::db::open(db)
        .with_context(|| format!("opening database {}", db.display()))?;
    nutricart_store::migrations::apply_migrations(&mut conn).context("applying migrations")?;
    Ok(conn)
}
