//! Seed import provenance

#![allow(clippy::result_large_err)]

use crate::errors::{sqlite_op, Result};
use rusqlite::{Connection, Transaction};

/// Whether a seed with this digest was already imported
pub fn already_imported(conn: &Connection, seed_digest: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM seed_imports WHERE seed_digest = ?1")
        .map_err(sqlite_op("seed_provenance"))?;
    stmt.exists([seed_digest]).map_err(sqlite_op("seed_provenance"))
}

pub fn record_import(
    tx: &Transaction,
    seed_digest: &str,
    source: Option<&str>,
    item_count: usize,
) -> Result<()> {
    tx.execute(
        "INSERT INTO seed_imports (seed_digest, source, item_count, imported_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            seed_digest,
            source,
            item_count as i64,
            chrono::Utc::now().timestamp()
        ],
    )
    .map_err(sqlite_op("seed_provenance"))?;

    tracing::info!(seed_digest, item_count, "Recorded seed import");
    Ok(())
}
