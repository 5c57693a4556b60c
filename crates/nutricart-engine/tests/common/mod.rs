#![allow(dead_code)]

use nutricart_core::model::NutritionTotals;
use nutricart_engine::commands::order_commit::OrderCommitRequest;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

pub const CATALOG_YAML: &str = r#"
schema_version: 0
items:
  - { name: Slice of Pizza, calories: 700, protein: 26, carbs: 80, fats: 28, fiber: 3, price: 1.99, favorite: true }
  - { name: Salad, calories: 650, protein: 42, carbs: 24, fats: 44, fiber: 5, price: 4.99 }
  - { name: Churro, calories: 570, protein: 6, carbs: 80, fats: 23, fiber: 2, price: 1.99 }
  - { name: Berry Smoothie, calories: 330, protein: 4, carbs: 76, fats: 1, fiber: 5, price: 2.99 }
"#;

pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    pub fn connect(&self) -> Connection {
        nutricart_store::db::open(&self.path).unwrap()
    }
}

/// Migrated, seeded database with users 1 (Ada Lovelace) and 2 (Alan Turing).
pub fn setup_test_db() -> (TestDb, Connection) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let mut conn = nutricart_store::db::open(&path).unwrap();
    nutricart_store::migrations::apply_migrations(&mut conn).unwrap();
    nutricart_store::seed::import_seed_str(CATALOG_YAML, &mut conn).unwrap();
    conn.execute_batch(
        "INSERT INTO users (user_id, first_name, last_name, email, password_hash)
         VALUES (1, 'Ada', 'Lovelace', 'ada@example.com', 'x');
         INSERT INTO users (user_id, first_name, last_name, email, password_hash)
         VALUES (2, 'Alan', 'Turing', 'alan@example.com', 'x');",
    )
    .unwrap();
    (TestDb { dir, path }, conn)
}

pub fn pizza_totals(count: i64) -> NutritionTotals {
    NutritionTotals {
        calories: 700 * count,
        protein: 26 * count,
        carbs: 80 * count,
        fats: 28 * count,
        fiber: 3 * count,
        price: 1.99 * count as f64,
    }
}

pub fn request(user_id: i64, items: &[&str], totals: NutritionTotals) -> OrderCommitRequest {
    OrderCommitRequest {
        user_id,
        items: items.iter().map(|s| s.to_string()).collect(),
        totals,
    }
}

pub fn row_counts(conn: &Connection) -> (i64, i64) {
    let orders = conn
        .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .unwrap();
    let lines = conn
        .query_row("SELECT COUNT(*) FROM order_items", [], |row| row.get(0))
        .unwrap();
    (orders, lines)
}
