//! Seed parser with validation

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::CatalogSeedV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<CatalogSeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error("seed_read", e).with_entity_id(path.display().to_string()))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<CatalogSeedV0> {
    let seed: CatalogSeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &CatalogSeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut names = HashSet::new();
    for item in &seed.items {
        if item.name.trim().is_empty() {
            return Err(seed_validation("Item name must not be blank"));
        }
        if !names.insert(item.name.as_str()) {
            return Err(seed_validation(&format!("Duplicate item name: {}", item.name)));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(seed_validation(&format!(
                "Item {} has invalid price {}",
                item.name, item.price
            )));
        }
    }

    Ok(())
}
