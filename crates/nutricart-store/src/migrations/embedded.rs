//! Embedded SQL migrations, compiled in with include_str!

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_catalog_schema",
            sql: include_str!("../../migrations/001_catalog_schema.sql"),
        },
        Migration {
            id: "002_identity_schema",
            sql: include_str!("../../migrations/002_identity_schema.sql"),
        },
        Migration {
            id: "003_orders_schema",
            sql: include_str!("../../migrations/003_orders_schema.sql"),
        },
    ]
}
