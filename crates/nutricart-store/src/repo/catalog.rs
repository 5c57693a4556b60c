//! Catalog reads, all driven through the filter-query builder

#![allow(clippy::result_large_err)]

use crate::errors::{sqlite_op, Result};
use nutricart_core::filter::{FilterCriteria, ItemQuery, SqlValue};
use nutricart_core::model::Item;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, Transaction};

/// SQLite repository for the item catalog
pub struct CatalogRepo;

impl CatalogRepo {
    /// Execute a built query with every value bound as a parameter
    pub fn query(conn: &Connection, query: &ItemQuery) -> Result<Vec<Item>> {
        let compiled = query.compile();
        tracing::debug!(
            sql = %compiled.sql,
            param_count = compiled.params.len(),
            "Executing catalog query"
        );

        let params: Vec<Value> = compiled.params.iter().map(to_sql_value).collect();
        let mut stmt = conn
            .prepare(&compiled.sql)
            .map_err(sqlite_op("catalog_query"))?;
        let items = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_item)
            .map_err(sqlite_op("catalog_query"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_op("catalog_query"))?;

        Ok(items)
    }

    /// Entire catalog ordered by name
    pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
        Self::query(conn, &ItemQuery::new())
    }

    /// Case-insensitive name containment
    pub fn search_by_name(conn: &Connection, fragment: &str) -> Result<Vec<Item>> {
        Self::query(conn, &ItemQuery::new().name_contains(fragment))
    }

    /// Items satisfying every present bound
    pub fn filter(conn: &Connection, criteria: &FilterCriteria) -> Result<Vec<Item>> {
        Self::query(conn, &criteria.to_query())
    }

    /// Items flagged as favorites
    pub fn favorites(conn: &Connection) -> Result<Vec<Item>> {
        Self::query(conn, &ItemQuery::new().favorites_only())
    }

    pub fn get_item(conn: &Connection, name: &str) -> Result<Option<Item>> {
        conn.query_row(
            "SELECT name, calories, protein, carbs, fats, fiber, price, favorite
             FROM items WHERE name = ?1",
            [name],
            row_to_item,
        )
        .optional()
        .map_err(sqlite_op("get_item"))
    }

    /// Names from `names` that are not in the catalog, in input order
    pub fn missing_names<S: AsRef<str>>(conn: &Connection, names: &[S]) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT 1 FROM items WHERE name = ?1")
            .map_err(sqlite_op("missing_names"))?;
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            let exists = stmt.exists([name]).map_err(sqlite_op("missing_names"))?;
            if !exists {
                missing.push(name.to_string());
            }
        }
        Ok(missing)
    }

    /// Insert or replace one catalog row within a transaction
    pub fn upsert_item_tx(tx: &Transaction, item: &Item) -> Result<()> {
        tx.execute(
            "INSERT INTO items (name, calories, protein, carbs, fats, fiber, price, favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(name) DO UPDATE SET
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fats = excluded.fats,
                fiber = excluded.fiber,
                price = excluded.price,
                favorite = excluded.favorite",
            rusqlite::params![
                item.name,
                item.calories,
                item.protein,
                item.carbs,
                item.fats,
                item.fiber,
                item.price,
                item.favorite,
            ],
        )
        .map_err(sqlite_op("upsert_item"))?;

        Ok(())
    }
}

fn to_sql_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Integer(v) => Value::Integer(*v),
        SqlValue::Real(v) => Value::Real(*v),
        SqlValue::Text(v) => Value::Text(v.clone()),
    }
}

pub(crate) fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        name: row.get(0)?,
        calories: row.get(1)?,
        protein: row.get(2)?,
        carbs: row.get(3)?,
        fats: row.get(4)?,
        fiber: row.get(5)?,
        price: row.get(6)?,
        favorite: row.get(7)?,
    })
}
