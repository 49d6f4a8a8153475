//! # storefront-core: Pure Domain Logic for the Storefront
//!
//! This crate holds the domain model shared by the database layer and the
//! HTTP API: money, products, shopping carts and the rules that keep a cart's
//! total consistent with its items. Everything here is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            storefront-api (axum routes + services)              │   │
//! │  │     products, cart, cart/items, cart/checkout, carts            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ cart_total│  │ clamping  │  │   │
//! │  │   │  Cart     │  │  parsing  │  │ Checkout  │  │  titles   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                storefront-db (Database Layer)                   │   │
//! │  │          SQLite queries, migrations, repositories               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ShoppingCart)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart total derivation and checkout outcomes
//! - [`error`] - Domain error types
//! - [`validation`] - Input normalization and validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "29.99".parse().unwrap();
//! assert_eq!(price.cents(), 2999);
//! assert_eq!(price.to_decimal_string(), "29.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{cart_total, CheckoutOutcome, CheckoutSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Highest accepted product price, in cents (99,999,999.99).
///
/// Ten digits with two decimal places, so even very large carts sum
/// without leaving `i64`.
pub const MAX_PRICE_CENTS: i64 = 99_999_999_99;
