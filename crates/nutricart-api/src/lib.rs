//! NutriCart HTTP API
//!
//! JSON over HTTP under `/api`. Handlers are thin: they decode the request,
//! run one engine query or command on a per-request connection, and map
//! the outcome to a status code.

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use nutricart_engine::identity::SqliteIdentityProvider;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use database::Database;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

/// Apply migrations, bind, and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated, or the address
/// cannot be bound.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::new(&config.db_path, config.busy_timeout);

    info!(db_path = %db.path().display(), "Applying migrations...");
    let mut conn = db.connect().context("opening database")?;
    nutricart_store::migrations::apply_migrations(&mut conn).context("applying migrations")?;
    drop(conn);

    let session_ttl =
        chrono::Duration::from_std(config.session_ttl).context("session ttl out of range")?;
    let identity = SqliteIdentityProvider::new().with_session_ttl(session_ttl);
    let app = router(AppState::with_identity(db, Arc::new(identity)), &config);

    let address = config.socket_addr();
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("binding to {address}"))?;
    info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
