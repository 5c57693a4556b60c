//! Canonical seed digest
//!
//! Items are sorted by name before hashing so reordering a seed file does
//! not change its identity.

use crate::seed::format_v0::CatalogSeedV0;
use sha2::{Digest, Sha256};

pub fn compute_seed_digest(seed: &CatalogSeedV0) -> String {
    let mut items: Vec<_> = seed.items.iter().collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));

    let canonical = serde_json::json!({
        "schema_version": seed.schema_version,
        "items": items,
    });

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutricart_core::model::Item;

    #[test]
    fn test_digest_ignores_item_order() {
        let a = Item::new("A", 1, 1, 1.0);
        let b = Item::new("B", 2, 2, 2.0);
        let forward = CatalogSeedV0 {
            schema_version: 0,
            items: vec![a.clone(), b.clone()],
        };
        let reversed = CatalogSeedV0 {
            schema_version: 0,
            items: vec![b, a],
        };
        assert_eq!(compute_seed_digest(&forward), compute_seed_digest(&reversed));
    }

    #[test]
    fn test_digest_changes_with_content() {
        let one = CatalogSeedV0 {
            schema_version: 0,
            items: vec![Item::new("A", 1, 1, 1.0)],
        };
        let two = CatalogSeedV0 {
            schema_version: 0,
            items: vec![Item::new("A", 1, 1, 1.5)],
        };
        assert_ne!(compute_seed_digest(&one), compute_seed_digest(&two));
    }
}
