//! # Cart Rules
//!
//! Pure rules for deriving a cart's total and describing checkout results.
//!
//! ## Cart State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Contents:   EMPTY ◄──── add / remove ────► HAS_ITEMS                 │
//! │                 ▲                                │                      │
//! │                 └──── checkout (all in stock) ───┘                      │
//! │                       or removal of last item                           │
//! │                                                                         │
//! │   Existence:  UNBOUND ──► BOUND ──► DELETED (terminal)                 │
//! │                                                                         │
//! │   After every structural change: total = cart_total(items)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// Sums item prices.
///
/// This is the only definition of a cart total. Callers persist the result;
/// nothing else writes a cart's total. Fails with `TotalOutOfRange` instead
/// of wrapping.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use storefront_core::{cart_total, Product};
///
/// let items: Vec<Product> = [2999, 3999, 1999]
///     .into_iter()
///     .enumerate()
///     .map(|(i, price_cents)| Product {
///         id: i as i64 + 1,
///         title: format!("Game {}", i),
///         price_cents,
///         inventory_count: 5,
///         created_at: Utc::now(),
///     })
///     .collect();
///
/// assert_eq!(cart_total(&items).unwrap().to_decimal_string(), "89.97");
/// ```
pub fn cart_total(items: &[Product]) -> CoreResult<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |total, item| total.checked_add(item.price()))
        .ok_or(CoreError::TotalOutOfRange { items: items.len() })
}

/// Which items a checkout sold and which it left in the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Products whose inventory was decremented and that left the cart.
    pub sold_product_ids: Vec<i64>,

    /// Products that had no inventory at checkout time and stayed in the cart.
    pub unavailable_product_ids: Vec<i64>,
}

impl CheckoutSummary {
    /// True when every item was sold and the cart ended up empty.
    pub fn is_complete(&self) -> bool {
        self.unavailable_product_ids.is_empty()
    }
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The session has no bound cart.
    NoCart,

    /// The cart has no items; nothing was touched.
    EmptyCart,

    /// Items were processed (possibly leaving unavailable ones behind).
    Completed(CheckoutSummary),
}

impl CheckoutOutcome {
    /// Human-readable outcome message returned to API clients.
    pub fn message(&self) -> &'static str {
        match self {
            CheckoutOutcome::NoCart => "No shopping cart is associated with this session",
            CheckoutOutcome::EmptyCart => "Shopping cart is empty",
            CheckoutOutcome::Completed(_) => "Shopping cart was successfully completed",
        }
    }

    /// The per-item summary, when items were processed.
    pub fn summary(&self) -> Option<&CheckoutSummary> {
        match self {
            CheckoutOutcome::Completed(summary) => Some(summary),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
