//! # Storefront API Library
//!
//! HTTP API over the Product Store and the Cart Manager.
//!
//! ## Module Organization
//! ```text
//! storefront_api/
//! ├── lib.rs          ◄─── You are here (router assembly, tracing setup)
//! ├── main.rs         ◄─── Server binary
//! ├── config.rs       ◄─── Environment configuration
//! ├── error.rs        ◄─── ApiError (code + message, IntoResponse)
//! ├── extract.rs      ◄─── Json/Path/Query wrappers rejecting with ApiError
//! ├── session.rs      ◄─── x-session-id middleware + SessionId extractor
//! ├── state/
//! │   └── mod.rs      ◄─── Storefront root object (axum state)
//! ├── services/
//! │   ├── product.rs  ◄─── ProductStore
//! │   └── cart.rs     ◄─── CartManager
//! └── routes/
//!     ├── mod.rs      ◄─── Route table + health
//!     ├── products.rs ◄─── Product handlers and DTOs
//!     └── carts.rs    ◄─── Cart handlers and DTOs
//! ```
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TraceLayer ──► session_middleware ──► route ──► handler               │
//! │                   (x-session-id)                  │                     │
//! │                                                   ▼                     │
//! │                                     Storefront { products, carts }     │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                          storefront-db (SQLite)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use axum::middleware;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use services::{CartManager, ProductStore, ServiceError};
pub use session::{SessionId, SESSION_HEADER};
pub use state::Storefront;

/// Builds the full application router.
pub fn app(storefront: Storefront) -> Router {
    routes::router()
        .with_state(storefront)
        .layer(middleware::from_fn(session::session_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_db=trace` - Trace repository calls only
/// - Default: INFO, DEBUG for the storefront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "info,storefront_api=debug,storefront_db=debug,storefront_core=debug,sqlx=warn,tower_http=info",
        )
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
