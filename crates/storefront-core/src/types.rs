//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌──────────────────────┐                  │
//! │  │    Product      │ ◄──────►│    ShoppingCart      │                  │
//! │  │  ─────────────  │  many   │  ──────────────────  │                  │
//! │  │  id             │  to     │  id                  │                  │
//! │  │  title          │  many   │  items (ordered set) │                  │
//! │  │  price_cents    │         │  total_cents         │                  │
//! │  │  inventory_count│         │  (derived from items)│                  │
//! │  └─────────────────┘         └──────────────────────┘                  │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   NewProduct    │  normalized creation input (clamped, validated)   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{normalize_inventory, normalize_price, validate_title};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (autoincrement).
    pub id: i64,

    /// Display title. Unique unless title enforcement is disabled.
    pub title: String,

    /// Price in cents, never negative.
    pub price_cents: i64,

    /// Units in stock, never negative.
    pub inventory_count: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether at least one unit can be added to a cart or sold.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.inventory_count > 0
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Normalized input for creating a product.
///
/// ## Normalization Rules
/// ```text
/// title            → trimmed, 1..=200 characters (else ValidationError)
/// price            → absent or negative  ⇒ 0.00, above 99999999.99 ⇒ ValidationError
/// inventory_count  → absent or negative  ⇒ 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub price: Money,
    pub inventory_count: i64,
}

impl NewProduct {
    /// Validates title and price bounds, and clamps price and inventory.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Money, NewProduct};
    ///
    /// let product = NewProduct::normalized("  Test  ", Some(Money::from_cents(-500)), None).unwrap();
    /// assert_eq!(product.title, "Test");
    /// assert_eq!(product.price, Money::zero());
    /// assert_eq!(product.inventory_count, 0);
    /// ```
    pub fn normalized(
        title: &str,
        price: Option<Money>,
        inventory_count: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;

        Ok(NewProduct {
            title,
            price: normalize_price(price)?,
            inventory_count: normalize_inventory(inventory_count),
        })
    }
}

// =============================================================================
// Shopping Cart
// =============================================================================

/// A shopping cart with its items in insertion order.
///
/// ## Invariants
/// - `items` holds each product at most once
/// - `items` is ordered by when each product was added
/// - `total_cents` equals the sum of item prices after every mutation
///   (see [`crate::cart::cart_total`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShoppingCart {
    pub id: i64,
    pub items: Vec<Product>,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ShoppingCart {
    /// Returns the cached total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Product ids in insertion order.
    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|p| p.id).collect()
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
