//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    29.99 + 39.99 + 19.99 = 89.97000000000001  ❌ WRONG!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2999 + 3999 + 1999 = 8997 cents = 89.97    ✅                        │
//! │                                                                         │
//! │  Prices arrive as decimal text or JSON numbers ("29.99", 5.00000).     │
//! │  They are read as rust_decimal::Decimal, rounded to two places and     │
//! │  only then turned into cents.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(2999);          // 29.99
//! let parsed: Money = "39.99".parse().unwrap(); // 39.99
//! let total = price.checked_add(parsed).unwrap();
//! assert_eq!(total.to_decimal_string(), "69.98");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative values can be parsed from input so they can
///   be clamped explicitly; stored prices and totals are never negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as cents**: `Money(2999)` is `2999` on the wire
/// - **No unchecked arithmetic**: sums go through [`Money::checked_add`]
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_cents ──► cart_total(items) ──► ShoppingCart.total_cents │
/// │         │                                                               │
/// │         └──► API "price": "29.99"        API "total": "89.97" ◄──┘     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Adds two amounts, returning `None` if the sum does not fit.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Converts a decimal amount to cents.
    ///
    /// The amount is rounded to two places, half away from zero
    /// (`1.005` → `1.01`, `-1.005` → `-1.01`).
    pub fn from_decimal(amount: Decimal) -> Result<Self, ValidationError> {
        amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "amount is too large".to_string(),
            })
    }

    /// The amount as an exact two-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Formats the amount as a plain two-digit decimal ("29.99", "-5.50").
    ///
    /// This is the representation used in API responses. `Display` adds a
    /// currency sign for logs.
    pub fn to_decimal_string(&self) -> String {
        self.to_decimal().to_string()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount into cents.
///
/// ## Accepted Forms
/// ```text
/// "29.99"       → 2999
/// "5.00000"     → 500
/// "-15039242"   → -1503924200
/// "1.005"       → 101   (half away from zero)
/// "2.5e1"       → 2500  (exponent form, as emitted by some JSON encoders)
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let amount = if s.contains(['e', 'E']) {
            Decimal::from_scientific(s)
        } else {
            Decimal::from_str(s)
        }
        .map_err(|e| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        })?;

        Money::from_decimal(amount)
    }
}

/// Serde helpers for decimal amounts on the wire.
///
/// Accepts a JSON number (`29.99`) or a string (`"29.99"`) through
/// `rust_decimal`'s serde support; `null` and a missing field both mean
/// "not supplied".
pub mod decimal {
    use rust_decimal::Decimal;
    use serde::de::{self, Deserialize, Deserializer};

    use super::Money;

    /// Deserializes an optional decimal amount into `Option<Money>`.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Decimal>::deserialize(deserializer)?
            .map(Money::from_decimal)
            .transpose()
            .map_err(de::Error::custom)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs. API responses use [`Money::to_decimal_string`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.to_decimal();
        if amount.is_sign_negative() {
            write!(f, "-${}", amount.abs())
        } else {
            write!(f, "${}", amount)
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
