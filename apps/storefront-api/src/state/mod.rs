//! # Application State
//!
//! The root object handed to every HTTP handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main()                                                                 │
//! │    ApiConfig::load() ──┐                                                │
//! │    Database::new() ────┼──► Storefront { products, carts, db }          │
//! │                        │        │                                       │
//! │                        │        └──► Router::with_state(storefront)     │
//! │                                                                         │
//! │  Handlers receive State<Storefront>; nothing is global.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_db::Database;

use crate::config::ApiConfig;
use crate::services::{CartManager, ProductStore};

/// Everything a request handler can reach.
///
/// Cloning is cheap: the services share one connection pool.
#[derive(Debug, Clone)]
pub struct Storefront {
    /// Catalog operations.
    pub products: ProductStore,

    /// Session cart operations.
    pub carts: CartManager,

    db: Database,
}

impl Storefront {
    /// Composes the services over one database handle.
    pub fn new(db: Database, unique_titles: bool) -> Self {
        Storefront {
            products: ProductStore::new(db.clone(), unique_titles),
            carts: CartManager::new(db.clone()),
            db,
        }
    }

    /// Composes the services using the loaded configuration.
    pub fn from_config(db: Database, config: &ApiConfig) -> Self {
        Self::new(db, config.unique_titles)
    }

    /// The underlying database (health checks, shutdown).
    pub fn database(&self) -> &Database {
        &self.db
    }
}
