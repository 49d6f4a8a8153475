//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront-api errors                                                 │
//! │  ├── ServiceError     - CoreError | DbError from the services          │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError → Client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ID, title, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule failures raised by the Product Store and Cart Manager.
///
/// All of these are local, recoverable conditions. None is retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found by id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Product cannot be found by title.
    #[error("Product not found: '{0}'")]
    ProductTitleNotFound(String),

    /// Shopping cart cannot be found by id.
    #[error("Shopping cart not found: {0}")]
    CartNotFound(i64),

    /// The caller's session has no bound cart.
    ///
    /// ## When This Occurs
    /// - `add_to_cart` / `remove_from_cart` before any cart was created
    /// - After the session's cart was deleted
    #[error("No active shopping cart for this session")]
    NoActiveCart,

    /// A product with this title already exists (only when uniqueness is enforced).
    #[error("A product titled '{0}' already exists")]
    DuplicateTitle(String),

    /// Product is still referenced by at least one cart and cannot be deleted.
    ///
    /// ## User Workflow
    /// ```text
    /// DELETE /products/3
    ///      │
    ///      ▼
    /// cart 7 still holds product 3
    ///      │
    ///      ▼
    /// ProductInCart { product_id: 3, carts: 1 }
    /// ```
    #[error("Product {product_id} is still in {carts} shopping cart(s)")]
    ProductInCart { product_id: i64, carts: i64 },

    /// A cart's item prices do not sum to a representable total.
    #[error("Cart total of {items} item(s) is out of range")]
    TotalOutOfRange { items: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Negative prices and inventory counts are clamped, never rejected; a
/// price above the catalog maximum is rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value above the accepted maximum.
    #[error("{field} must be at most {max}")]
    OutOfRange { field: String, max: String },

    /// Invalid format (e.g., non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ProductNotFound(42).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CoreError::ProductInCart {
                product_id: 3,
                carts: 2
            }
            .to_string(),
            "Product 3 is still in 2 shopping cart(s)"
        );
        assert_eq!(
            CoreError::DuplicateTitle("Fallout 4".to_string()).to_string(),
            "A product titled 'Fallout 4' already exists"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "title must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
