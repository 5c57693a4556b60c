//! Atomic order commit.
//!
//! One call writes one order row plus one line per distinct item, or
//! nothing at all.

#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDate;
use nutricart_core::cart::{collapse_quantities, recompute_totals, CartLine};
use nutricart_core::errors::{ExError, ExErrorKind, NutriCartError};
use nutricart_core::model::{NutritionTotals, Order, OrderId, UserId};
use nutricart_core::rules::validation::{validate_cart, validate_totals};
use nutricart_core::{log_op_end, log_op_error, log_op_start};
use nutricart_store::errors::{sqlite_op, Result};
use nutricart_store::repo::{CatalogRepo, OrderRepo};
use rusqlite::{Connection, TransactionBehavior};

/// Attempts made when the allocated order id is taken by another writer.
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// A checkout: one entry in `items` per selection, so repeats mean quantity.
#[derive(Debug, Clone)]
pub struct OrderCommitRequest {
    pub user_id: UserId,
    pub items: Vec<String>,
    /// Persisted as supplied; not checked against the catalog.
    pub totals: NutritionTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCommitResult {
    pub order_id: OrderId,
    pub date: NaiveDate,
    pub lines: Vec<CartLine>,
}

/// Commit an order in a single IMMEDIATE transaction.
///
/// # Errors
///
/// Validation kinds (`EmptyCart`, `InvalidInput`, `UnknownItem`) when the
/// cart is rejected; data-access kinds when the store fails. Nothing is
/// written in either case.
pub fn commit_order(request: &OrderCommitRequest, conn: &mut Connection) -> Result<OrderCommitResult> {
    log_op_start!(
        "commit_order",
        user_id = request.user_id,
        cart_len = request.items.len()
    );
    let start = Instant::now();

    let result = commit_with_retry(request, conn);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(r) => log_op_end!(
            "commit_order",
            duration_ms = elapsed,
            order_id = r.order_id,
            line_count = r.lines.len()
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("commit_order", e_clone, duration_ms = elapsed);
        }
    }
    result
}

fn commit_with_retry(request: &OrderCommitRequest, conn: &mut Connection) -> Result<OrderCommitResult> {
    validate_cart(&request.items)?;
    validate_totals(&request.totals)?;
    let lines = collapse_quantities(&request.items);

    let mut attempt = 1;
    loop {
        match commit_once(request, &lines, conn) {
            Err(e) if is_order_id_conflict(&e) && attempt < MAX_COMMIT_ATTEMPTS => {
                tracing::warn!(
                    attempt,
                    order_id = ?e.entity_id(),
                    "Order id taken by another writer, retrying"
                );
                attempt += 1;
            }
            Err(e) if is_order_id_conflict(&e) => return Err(retries_exhausted(e)),
            other => return other,
        }
    }
}

fn commit_once(
    request: &OrderCommitRequest,
    lines: &[CartLine],
    conn: &mut Connection,
) -> Result<OrderCommitResult> {
    // Dropping `tx` on any early return rolls back.
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(sqlite_op("begin_commit"))?;

    let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
    let missing = CatalogRepo::missing_names(&tx, &names)?;
    if !missing.is_empty() {
        return Err(NutriCartError::UnknownItems { names: missing }.into());
    }
    warn_on_totals_drift(&tx, request, lines)?;

    let order_id = OrderRepo::next_order_id(&tx)?;
    let date = chrono::Local::now().date_naive();
    let order = Order::placed(order_id, request.user_id, date, &request.totals);
    OrderRepo::insert_order_tx(&tx, &order)?;
    for line in lines {
        OrderRepo::insert_line_tx(&tx, order_id, line)?;
    }

    tx.commit().map_err(sqlite_op("commit_order"))?;

    Ok(OrderCommitResult {
        order_id,
        date,
        lines: lines.to_vec(),
    })
}

/// Client totals are stored as sent; a mismatch with the catalog is only logged.
fn warn_on_totals_drift(
    conn: &Connection,
    request: &OrderCommitRequest,
    lines: &[CartLine],
) -> Result<()> {
    let mut catalog = HashMap::with_capacity(lines.len());
    for line in lines {
        if let Some(item) = CatalogRepo::get_item(conn, &line.name)? {
            catalog.insert(item.name.clone(), item);
        }
    }
    if let Ok(expected) = recompute_totals(lines, &catalog) {
        if !expected.approx_eq(&request.totals) {
            tracing::warn!(
                op = "check_totals",
                user_id = request.user_id,
                client_calories = request.totals.calories,
                catalog_calories = expected.calories,
                client_price_cents = request.totals.price_cents(),
                catalog_price_cents = expected.price_cents(),
                "Client totals differ from catalog"
            );
        }
    }
    Ok(())
}

fn is_order_id_conflict(err: &ExError) -> bool {
    err.kind() == ExErrorKind::Concurrency && err.op() == Some("insert_order")
}

fn retries_exhausted(last: ExError) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("commit_order")
        .with_message(format!(
            "order id still taken after {} attempts",
            MAX_COMMIT_ATTEMPTS
        ))
        .with_source(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_insert_order_conflicts_are_retried() {
        let conflict = ExError::new(ExErrorKind::Concurrency).with_op("insert_order");
        let busy = ExError::new(ExErrorKind::Concurrency).with_op("begin_commit");
        let fk = ExError::new(ExErrorKind::ConstraintViolation).with_op("insert_order");

        assert!(is_order_id_conflict(&conflict));
        assert!(!is_order_id_conflict(&busy));
        assert!(!is_order_id_conflict(&fk));
    }

    #[test]
    fn test_exhausted_retries_keep_last_conflict_as_source() {
        let conflict = ExError::new(ExErrorKind::Concurrency)
            .with_op("insert_order")
            .with_entity_id("1003");

        let err = retries_exhausted(conflict);

        assert_eq!(err.kind(), ExErrorKind::Concurrency);
        assert!(!is_order_id_conflict(&err));
        assert!(err.message().contains("3 attempts"));
        let source = err.source_error().unwrap();
        assert_eq!(source.op(), Some("insert_order"));
        assert_eq!(source.entity_id(), Some("1003"));
    }
}
