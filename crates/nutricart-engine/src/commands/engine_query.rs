//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for catalog, order and
//! statistics reads. Unlike `apply_engine_command`, it accepts a shared
//! connection, opens no transaction and never writes.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use nutricart_core::filter::FilterCriteria;
use nutricart_core::model::{Item, Order, OrderDetail, OrderId, OrderWithUser, UserId, UserStats};
use nutricart_core::{log_op_end, log_op_error, log_op_start};
use nutricart_store::errors::Result;
use nutricart_store::repo::{CatalogRepo, OrderRepo};
use rusqlite::Connection;
use serde::Serialize;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    // ── Catalog ───────────────────────────────────────────────────────────────
    /// Whole catalog, by name.
    ItemList,
    /// Case-insensitive substring match on name. `None` or blank lists all.
    ItemSearch { query: Option<String> },
    /// Items satisfying every present bound.
    ItemFilter(FilterCriteria),
    /// Items flagged as favorites.
    ItemFavorites,

    // ── Orders ────────────────────────────────────────────────────────────────
    /// A user's orders with their name, newest first.
    OrdersForUser { user_id: UserId },
    /// A user's favorite orders, newest first.
    FavoriteOrdersForUser { user_id: UserId },
    /// One order with its line items. Unknown ids yield `order: None`.
    OrderDetail { order_id: OrderId },

    // ── Stats ─────────────────────────────────────────────────────────────────
    UserStats { user_id: UserId },
}

impl EngineQuery {
    /// Stable operation name used in log events.
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::ItemList => "item_list",
            EngineQuery::ItemSearch { .. } => "item_search",
            EngineQuery::ItemFilter(_) => "item_filter",
            EngineQuery::ItemFavorites => "item_favorites",
            EngineQuery::OrdersForUser { .. } => "orders_for_user",
            EngineQuery::FavoriteOrdersForUser { .. } => "favorite_orders_for_user",
            EngineQuery::OrderDetail { .. } => "order_detail",
            EngineQuery::UserStats { .. } => "user_stats",
        }
    }
}

/// All possible results from `apply_engine_query`.
///
/// Serializes as the bare payload so the HTTP layer can return it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineQueryResult {
    Items(Vec<Item>),
    Orders(Vec<OrderWithUser>),
    FavoriteOrders(Vec<Order>),
    OrderDetail(OrderDetail),
    UserStats(UserStats),
}

impl EngineQueryResult {
    fn row_count(&self) -> usize {
        match self {
            EngineQueryResult::Items(items) => items.len(),
            EngineQueryResult::Orders(orders) => orders.len(),
            EngineQueryResult::FavoriteOrders(orders) => orders.len(),
            EngineQueryResult::OrderDetail(detail) => detail.items.len(),
            EngineQueryResult::UserStats(_) => 1,
        }
    }
}

/// Apply a read-only query.
///
/// # Errors
///
/// Data-access kinds only; absent rows are empty results, never errors.
pub fn apply_engine_query(query: EngineQuery, conn: &Connection) -> Result<EngineQueryResult> {
    let op = query.op_name();
    log_op_start!(op);
    let start = Instant::now();

    let result = match query {
        EngineQuery::ItemList => CatalogRepo::list_items(conn).map(EngineQueryResult::Items),
        EngineQuery::ItemSearch { query } => {
            CatalogRepo::search_by_name(conn, query.as_deref().unwrap_or("").trim())
                .map(EngineQueryResult::Items)
        }
        EngineQuery::ItemFilter(criteria) => {
            CatalogRepo::filter(conn, &criteria).map(EngineQueryResult::Items)
        }
        EngineQuery::ItemFavorites => CatalogRepo::favorites(conn).map(EngineQueryResult::Items),
        EngineQuery::OrdersForUser { user_id } => {
            OrderRepo::orders_for_user(conn, user_id).map(EngineQueryResult::Orders)
        }
        EngineQuery::FavoriteOrdersForUser { user_id } => {
            OrderRepo::favorite_orders_for_user(conn, user_id)
                .map(EngineQueryResult::FavoriteOrders)
        }
        EngineQuery::OrderDetail { order_id } => (|| -> Result<EngineQueryResult> {
            let order = OrderRepo::get_order(conn, order_id)?;
            let items = OrderRepo::lines_for_order(conn, order_id)?;
            Ok(EngineQueryResult::OrderDetail(OrderDetail { order, items }))
        })(),
        EngineQuery::UserStats { user_id } => {
            OrderRepo::stats_for_user(conn, user_id).map(EngineQueryResult::UserStats)
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(r) => log_op_end!(op, duration_ms = elapsed, row_count = r.row_count()),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}
