//! # Storefront API Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (RUST_LOG overrides the default filter)          │
//! │  2. Load ApiConfig from the environment                                 │
//! │  3. Open SQLite (WAL, foreign keys) and run pending migrations          │
//! │  4. Compose Storefront { products, carts }                              │
//! │  5. Serve on 0.0.0.0:{port} until Ctrl+C / SIGTERM                      │
//! │  6. Close the connection pool                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use storefront_api::{app, init_tracing, ApiConfig, ConfigError, Storefront};
use storefront_db::{Database, DbConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Storefront API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path.display(),
        unique_titles = config.unique_titles,
        "Configuration loaded"
    );

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::DataDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let db_config =
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config).await?;
    info!("Database connected and migrations applied");

    let storefront = Storefront::from_config(db.clone(), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app(storefront))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
