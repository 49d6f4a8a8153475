//! # Services
//!
//! The two components that own the storefront's business rules.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductStore   catalog: create (clamp + validate), get, lookup,        │
//! │                 list, delete (refused while a cart holds the product)   │
//! │                                                                         │
//! │  CartManager    per-session cart: get-or-create, create, add, remove,   │
//! │                 checkout, delete; recomputes the total after each write │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both return plain values or a [`ServiceError`]; mapping to HTTP happens
//! in [`crate::error`].

pub mod cart;
pub mod product;

pub use cart::CartManager;
pub use product::ProductStore;

use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;
use thiserror::Error;

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
pub(crate) mod test_support {
    use storefront_core::{Money, NewProduct, Product};
    use storefront_db::{Database, DbConfig};

    pub async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub async fn product(db: &Database, title: &str, price: &str, inventory: i64) -> Product {
        let price: Money = price.parse().unwrap();
        let new = NewProduct::normalized(title, Some(price), Some(inventory)).unwrap();
        db.products().insert(&new).await.unwrap()
    }
}
