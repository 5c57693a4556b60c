//! Migrate command
//!
//! Usage: nutricart migrate

use std::path::Path;

/// Apply pending migrations and list what is applied
pub fn execute(db: &Path) -> anyhow::Result<()> {
    let conn = super::open_migrated(db)?;
    let applied = nutricart_store::migrations::applied_migrations(&conn)?;
    println!("✓ Database {} is at schema version {}", db.display(), applied.len());
    for id in applied {
        println!("  {}", id);
    }
    Ok(())
}
