#![allow(dead_code)]

use rusqlite::Connection;
use tempfile::TempDir;

pub const CATALOG_YAML: &str = r#"
schema_version: 0
items:
  - { name: Slice of Pizza, calories: 700, protein: 26, carbs: 80, fats: 28, fiber: 3, price: 1.99, favorite: true }
  - { name: Hot Dog & Soda, calories: 570, protein: 24, carbs: 46, fats: 32, fiber: 2, price: 1.50 }
  - { name: Chicken Bake, calories: 770, protein: 46, carbs: 72, fats: 32, fiber: 3, price: 3.99 }
  - { name: Churro, calories: 570, protein: 6, carbs: 80, fats: 23, fiber: 2, price: 1.99 }
  - { name: Berry Smoothie, calories: 330, protein: 4, carbs: 76, fats: 1, fiber: 5, price: 2.99, favorite: true }
  - { name: 100% Juice, calories: 120, protein: 1, carbs: 28, fats: 0, fiber: 0, price: 1.25 }
  - { name: Acai Bowl, calories: 420, protein: 6, carbs: 78, fats: 11, fiber: 9, price: 6.99 }
"#;

pub fn setup_test_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let mut conn = nutricart_store::db::open(temp_dir.path().join("test.db")).unwrap();
    nutricart_store::migrations::apply_migrations(&mut conn).unwrap();
    nutricart_store::seed::import_seed_str(CATALOG_YAML, &mut conn).unwrap();
    (temp_dir, conn)
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}

pub fn insert_user(conn: &Connection, user_id: i64, first: &str, last: &str) {
    conn.execute(
        "INSERT INTO users (user_id, first_name, last_name, email, password_hash, login_history)
         VALUES (?1, ?2, ?3, ?4, 'x', NULL)",
        rusqlite::params![user_id, first, last, format!("{}@example.com", first.to_lowercase())],
    )
    .unwrap();
}
