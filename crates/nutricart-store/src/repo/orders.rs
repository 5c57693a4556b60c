//! Order ledger persistence and projections

#![allow(clippy::result_large_err)]

use crate::errors::{is_primary_key_conflict, sqlite_op, Result};
use nutricart_core::errors::{ExError, ExErrorKind};
use nutricart_core::cart::CartLine;
use nutricart_core::model::{Item, Order, OrderId, OrderLine, OrderWithUser, UserId, UserStats};
use rusqlite::{Connection, OptionalExtension, Row, Transaction};

/// First identifier handed out when the ledger is empty.
pub const ORDER_ID_FLOOR: OrderId = 1000;

const ORDER_COLUMNS: &str = "o.order_id, o.user_id, o.date, o.favorite, o.notes,
     o.total_calories, o.total_protein, o.total_carbs, o.total_fats, o.total_fiber, o.receipt";

/// SQLite repository for orders and their line items
pub struct OrderRepo;

impl OrderRepo {
    /// Next identifier: one past the committed maximum, or the floor.
    ///
    /// Must run inside the same write transaction as the insert that uses it.
    pub fn next_order_id(tx: &Transaction) -> Result<OrderId> {
        tx.query_row(
            "SELECT COALESCE(MAX(order_id) + 1, ?1) FROM orders",
            [ORDER_ID_FLOOR],
            |row| row.get(0),
        )
        .map_err(sqlite_op("next_order_id"))
    }

    /// Insert an order row.
    ///
    /// A clash on `order_id` means another writer took the identifier and is
    /// reported as `Concurrency`; other constraint failures (unknown user)
    /// stay `ConstraintViolation`.
    pub fn insert_order_tx(tx: &Transaction, order: &Order) -> Result<()> {
        tx.execute(
            "INSERT INTO orders (
                order_id, user_id, date, favorite, notes,
                total_calories, total_protein, total_carbs, total_fats, total_fiber, receipt
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                order.order_id,
                order.user_id,
                order.date,
                order.favorite,
                order.notes,
                order.total_calories,
                order.total_protein,
                order.total_carbs,
                order.total_fats,
                order.total_fiber,
                order.receipt,
            ],
        )
        .map_err(|e| {
            if is_primary_key_conflict(&e) {
                ExError::new(ExErrorKind::Concurrency)
                    .with_op("insert_order")
                    .with_entity_id(order.order_id.to_string())
                    .with_message("order id already taken")
            } else {
                sqlite_op("insert_order")(e).with_entity_id(order.order_id.to_string())
            }
        })?;

        Ok(())
    }

    pub fn insert_line_tx(tx: &Transaction, order_id: OrderId, line: &CartLine) -> Result<()> {
        tx.execute(
            "INSERT INTO order_items (order_id, item_name, quantity) VALUES (?1, ?2, ?3)",
            rusqlite::params![order_id, line.name, line.quantity],
        )
        .map_err(|e| sqlite_op("insert_order_item")(e).with_entity_id(line.name.clone()))?;

        Ok(())
    }

    /// A user's orders joined with their name, newest first
    pub fn orders_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<OrderWithUser>> {
        let sql = format!(
            "SELECT {}, u.first_name, u.last_name
             FROM orders o
             JOIN users u ON o.user_id = u.user_id
             WHERE o.user_id = ?1
             ORDER BY o.date DESC, o.order_id DESC",
            ORDER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql).map_err(sqlite_op("orders_for_user"))?;
        let rows = stmt
            .query_map([user_id], |row| {
                Ok(OrderWithUser {
                    order: row_to_order(row)?,
                    first_name: row.get(11)?,
                    last_name: row.get(12)?,
                })
            })
            .map_err(sqlite_op("orders_for_user"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_op("orders_for_user"))?;
        Ok(rows)
    }

    /// A user's favorite orders, newest first
    pub fn favorite_orders_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT {} FROM orders o
             WHERE o.user_id = ?1 AND o.favorite = 1
             ORDER BY o.date DESC, o.order_id DESC",
            ORDER_COLUMNS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(sqlite_op("favorite_orders_for_user"))?;
        let rows = stmt
            .query_map([user_id], row_to_order)
            .map_err(sqlite_op("favorite_orders_for_user"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_op("favorite_orders_for_user"))?;
        Ok(rows)
    }

    pub fn get_order(conn: &Connection, order_id: OrderId) -> Result<Option<Order>> {
        let sql = format!("SELECT {} FROM orders o WHERE o.order_id = ?1", ORDER_COLUMNS);
        conn.query_row(&sql, [order_id], row_to_order)
            .optional()
            .map_err(sqlite_op("get_order"))
    }

    /// Line items of an order joined with their catalog rows, by item name
    pub fn lines_for_order(conn: &Connection, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let mut stmt = conn
            .prepare(
                "SELECT oi.order_id, oi.item_name, oi.quantity,
                        i.name, i.calories, i.protein, i.carbs, i.fats, i.fiber, i.price, i.favorite
                 FROM order_items oi
                 JOIN items i ON oi.item_name = i.name
                 WHERE oi.order_id = ?1
                 ORDER BY oi.item_name",
            )
            .map_err(sqlite_op("lines_for_order"))?;
        let rows = stmt
            .query_map([order_id], |row| {
                Ok(OrderLine {
                    order_id: row.get(0)?,
                    item_name: row.get(1)?,
                    quantity: row.get(2)?,
                    item: Item {
                        name: row.get(3)?,
                        calories: row.get(4)?,
                        protein: row.get(5)?,
                        carbs: row.get(6)?,
                        fats: row.get(7)?,
                        fiber: row.get(8)?,
                        price: row.get(9)?,
                        favorite: row.get(10)?,
                    },
                })
            })
            .map_err(sqlite_op("lines_for_order"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_op("lines_for_order"))?;
        Ok(rows)
    }

    /// Count, averages and spend over a user's orders
    pub fn stats_for_user(conn: &Connection, user_id: UserId) -> Result<UserStats> {
        conn.query_row(
            "SELECT COUNT(*), AVG(total_calories), AVG(total_protein), SUM(receipt)
             FROM orders WHERE user_id = ?1",
            [user_id],
            |row| {
                Ok(UserStats {
                    total_orders: row.get(0)?,
                    avg_calories: row.get(1)?,
                    avg_protein: row.get(2)?,
                    total_spent: row.get(3)?,
                })
            },
        )
        .map_err(sqlite_op("stats_for_user"))
    }
}

fn row_to_order(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        order_id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        favorite: row.get(3)?,
        notes: row.get(4)?,
        total_calories: row.get(5)?,
        total_protein: row.get(6)?,
        total_carbs: row.get(7)?,
        total_fats: row.get(8)?,
        total_fiber: row.get(9)?,
        receipt: row.get(10)?,
    })
}
