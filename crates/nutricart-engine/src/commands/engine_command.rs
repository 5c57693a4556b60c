//! Engine-level commands that write to the store.

#![allow(clippy::result_large_err)]

use crate::commands::order_commit::{commit_order, OrderCommitRequest, OrderCommitResult};
use nutricart_store::errors::Result;
use rusqlite::Connection;

/// Engine-level commands that require a writable connection.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Persist a checkout atomically.
    CommitOrder(OrderCommitRequest),
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    OrderCommitted(OrderCommitResult),
}

/// Apply an engine command.
///
/// # Errors
///
/// Propagates the command's validation or data-access error.
pub fn apply_engine_command(cmd: EngineCommand, conn: &mut Connection) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::CommitOrder(request) => {
            commit_order(&request, conn).map(EngineCommandResult::OrderCommitted)
        }
    }
}
