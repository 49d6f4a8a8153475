//! # Validation Module
//!
//! Input normalization and validation for catalog writes.
//!
//! ## Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Normalize vs. Reject                               │
//! │                                                                         │
//! │  price            absent / negative  ──► clamp to 0.00                 │
//! │                   above 99999999.99  ──► ValidationError (rejected)    │
//! │  inventory_count  absent / negative  ──► clamp to 0      (never fails) │
//! │  title            blank / too long   ──► ValidationError (rejected)    │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure rules)                                     │
//! │  Layer 2: Product Store (uniqueness policy, needs the database)        │
//! │  Layer 3: SQLite (NOT NULL, CHECK, foreign keys)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_PRICE_CENTS, MAX_TITLE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product title and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_title;
///
/// assert_eq!(validate_title("  FIFA 19 ").unwrap(), "FIFA 19");
/// assert!(validate_title("").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(title.to_string())
}

/// Clamps a product price: absent or negative becomes zero.
///
/// Prices above [`MAX_PRICE_CENTS`] are rejected.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::normalize_price;
///
/// assert_eq!(normalize_price(None).unwrap(), Money::zero());
/// assert_eq!(normalize_price(Some(Money::from_cents(-500))).unwrap(), Money::zero());
/// assert_eq!(normalize_price(Some(Money::from_cents(2999))).unwrap().cents(), 2999);
/// ```
pub fn normalize_price(price: Option<Money>) -> ValidationResult<Money> {
    match price {
        Some(price) if price.cents() > MAX_PRICE_CENTS => Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_decimal_string(),
        }),
        Some(price) if price.cents() > 0 => Ok(price),
        _ => Ok(Money::zero()),
    }
}

/// Clamps an inventory count: absent or negative becomes zero.
pub fn normalize_inventory(count: Option<i64>) -> i64 {
    count.unwrap_or(0).max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("Fallout 4").unwrap(), "Fallout 4");
        assert_eq!(validate_title("  Star Wars Battlefront || ").unwrap(), "Star Wars Battlefront ||");
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(201)).is_err());
        assert!(validate_title(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price(None).unwrap(), Money::zero());
        assert_eq!(
            normalize_price(Some(Money::from_cents(-1_503_924_200))).unwrap(),
            Money::zero()
        );
        assert_eq!(normalize_price(Some(Money::from_cents(500))).unwrap().cents(), 500);
    }

    #[test]
    fn test_normalize_price_upper_bound() {
        let max = Money::from_cents(MAX_PRICE_CENTS);
        assert_eq!(normalize_price(Some(max)).unwrap(), max);

        let err = normalize_price(Some(Money::from_cents(MAX_PRICE_CENTS + 1))).unwrap_err();
        assert_eq!(err.to_string(), "price must be at most 99999999.99");

        let huge: Money = "60000000000000000".parse().unwrap();
        assert!(matches!(
            normalize_price(Some(huge)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_normalize_inventory() {
        assert_eq!(normalize_inventory(None), 0);
        assert_eq!(normalize_inventory(Some(-7)), 0);
        assert_eq!(normalize_inventory(Some(5)), 5);
    }
}
