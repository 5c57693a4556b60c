//! Stats command
//!
//! Usage: nutricart stats <USER_ID>

use std::path::Path;

use clap::Args;
use nutricart_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// User whose orders are aggregated
    pub user_id: i64,
}

pub fn execute(args: StatsArgs, db: &Path) -> anyhow::Result<()> {
    let conn = super::open_migrated(db)?;
    let result = apply_engine_query(EngineQuery::UserStats { user_id: args.user_id }, &conn)?;
    if let EngineQueryResult::UserStats(stats) = &result {
        if !stats.has_data() {
            eprintln!("No orders for user {}", args.user_id);
        }
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
