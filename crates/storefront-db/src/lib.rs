//! # storefront-db: Database Layer for the Storefront
//!
//! This crate provides database access for the storefront.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  HTTP handler → Cart Manager / Product Store                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CartRepo       │    │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │ SessionRepo    │    │  schema.sql  │  │   │
//! │  │   │ Management    │    │                │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, cart, session)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//! let products = db.products().list(Some(0)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::{CartRepository, SaleOutcome};
pub use repository::product::ProductRepository;
pub use repository::session::SessionRepository;
