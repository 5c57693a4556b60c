//! Serve command
//!
//! Usage: nutricart serve [--port <PORT>] [--bind <ADDR>] [--session-ttl-hours <N>]

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use nutricart_api::config::{ServerConfig, DEFAULT_PORT};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "NUTRICART_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Milliseconds a request waits for the database write lock
    #[arg(long, default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    /// Hours a login token stays valid
    #[arg(long, default_value_t = 24)]
    pub session_ttl_hours: u64,
}

pub fn execute(args: ServeArgs, db: PathBuf) -> anyhow::Result<()> {
    let config = ServerConfig {
        bind_address: args.bind,
        port: args.port,
        db_path: db,
        busy_timeout: Duration::from_millis(args.busy_timeout_ms),
        session_ttl: Duration::from_secs(args.session_ttl_hours * 60 * 60),
        ..ServerConfig::default()
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?
        .block_on(nutricart_api::serve(config))
}
