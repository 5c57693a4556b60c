//! Seed importer orchestration

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::CatalogRepo;
use crate::seed::format_v0::CatalogSeedV0;
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str, provenance};
use rusqlite::Connection;
use std::path::Path;

/// Outcome of a seed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedImportReport {
    pub seed_digest: String,
    pub item_count: usize,
    /// True when this exact seed had been imported before and nothing was written
    pub skipped: bool,
}

/// Import a catalog seed file
///
/// 1. Parses and validates the YAML
/// 2. Computes the canonical digest; a known digest is a no-op
/// 3. Upserts every item and records provenance in one transaction
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedImportReport> {
    let seed = parse_seed_file(path)?;
    import_parsed(&seed, Some(&path.display().to_string()), conn)
}

/// Import a catalog seed held in memory
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<SeedImportReport> {
    let seed = parse_seed_str(content)?;
    import_parsed(&seed, None, conn)
}

fn import_parsed(
    seed: &CatalogSeedV0,
    source: Option<&str>,
    conn: &mut Connection,
) -> Result<SeedImportReport> {
    let seed_digest = compute_seed_digest(seed);

    if provenance::already_imported(conn, &seed_digest)? {
        tracing::info!(seed_digest = %seed_digest, "Seed already imported, skipping");
        return Ok(SeedImportReport {
            seed_digest,
            item_count: seed.items.len(),
            skipped: true,
        });
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    for item in &seed.items {
        CatalogRepo::upsert_item_tx(&tx, item)?;
    }
    provenance::record_import(&tx, &seed_digest, source, seed.items.len())?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(SeedImportReport {
        seed_digest,
        item_count: seed.items.len(),
        skipped: false,
    })
}
