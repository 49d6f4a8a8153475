//! # Cart Repository
//!
//! Database operations for shopping carts and their items.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() → ShoppingCart { items: [], total_cents: 0 }          │
//! │                                                                         │
//! │  2. CHANGE ITEMS                                                       │
//! │     └── add_item()    INSERT OR IGNORE (one row per product)           │
//! │     └── remove_item()                                                  │
//! │     └── store_total() ← written by the Cart Manager after every change │
//! │                                                                         │
//! │  3. CHECKOUT (one transaction per item)                                │
//! │     └── sell_item()                                                    │
//! │           DELETE FROM cart_items ...       (0 rows → NotInCart)        │
//! │           UPDATE products SET inventory_count = inventory_count - 1    │
//! │            WHERE id = ? AND inventory_count > 0  (0 rows → OutOfStock) │
//! │           a 0-row step rolls the whole item back                       │
//! │                                                                         │
//! │  4. DELETE                                                             │
//! │     └── delete() → items and session binding go with it (CASCADE)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{Money, Product, ShoppingCart};

/// Cart header row, before its items are attached.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: i64,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl CartRow {
    fn with_items(self, items: Vec<Product>) -> ShoppingCart {
        ShoppingCart {
            id: self.id,
            items,
            total_cents: self.total_cents,
            created_at: self.created_at,
        }
    }
}

/// Result of selling one cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
    /// One unit was taken from inventory and the item left the cart.
    Sold,
    /// No inventory left; the item stays in the cart.
    OutOfStock,
    /// The item was no longer in the cart; inventory untouched.
    NotInCart,
}

/// Repository for shopping cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Creates an empty cart with a zero total.
    pub async fn create(&self) -> DbResult<ShoppingCart> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            INSERT INTO shopping_carts (total_cents, created_at)
            VALUES (0, ?1)
            RETURNING id, total_cents, created_at
            "#,
        )
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!(cart_id = row.id, "Created shopping cart");
        Ok(row.with_items(Vec::new()))
    }

    /// Gets a cart with its items in insertion order.
    ///
    /// ## Returns
    /// * `Ok(Some(ShoppingCart))` - Cart found
    /// * `Ok(None)` - Cart not found
    pub async fn get(&self, id: i64) -> DbResult<Option<ShoppingCart>> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, total_cents, created_at FROM shopping_carts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.items(row.id).await?;
                Ok(Some(row.with_items(items)))
            }
            None => Ok(None),
        }
    }

    /// Lists every cart, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<ShoppingCart>> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT id, total_cents, created_at FROM shopping_carts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut carts = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items(row.id).await?;
            carts.push(row.with_items(items));
        }

        Ok(carts)
    }

    /// Products currently in the cart, in the order they were added.
    pub async fn items(&self, cart_id: i64) -> DbResult<Vec<Product>> {
        let items = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.title, p.price_cents, p.inventory_count, p.created_at
            FROM cart_items ci
            INNER JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = ?1
            ORDER BY ci.id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Adds a product to the cart.
    ///
    /// ## Returns
    /// * `Ok(true)` - Item row inserted
    /// * `Ok(false)` - The product was already in the cart
    pub async fn add_item(&self, cart_id: i64, product_id: i64) -> DbResult<bool> {
        debug!(cart_id, product_id, "Adding item to cart");

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO cart_items (cart_id, product_id, added_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a product from the cart.
    ///
    /// ## Returns
    /// * `Ok(true)` - Item row deleted
    /// * `Ok(false)` - The product wasn't in the cart
    pub async fn remove_item(&self, cart_id: i64, product_id: i64) -> DbResult<bool> {
        debug!(cart_id, product_id, "Removing item from cart");

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1 AND product_id = ?2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Persists a cart's total.
    pub async fn store_total(&self, cart_id: i64, total: Money) -> DbResult<()> {
        debug!(cart_id, total = %total, "Storing cart total");

        let result = sqlx::query("UPDATE shopping_carts SET total_cents = ?2 WHERE id = ?1")
            .bind(cart_id)
            .bind(total.cents())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ShoppingCart", cart_id));
        }

        Ok(())
    }

    /// Sells one unit of a product out of the cart.
    ///
    /// The item removal and the conditional decrement commit together or not
    /// at all, so inventory only drops for an item actually taken out of the
    /// cart.
    pub async fn sell_item(&self, cart_id: i64, product_id: i64) -> DbResult<SaleOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let removed = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1 AND product_id = ?2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!(cart_id, product_id, "Item left the cart before checkout");
            return Ok(SaleOutcome::NotInCart);
        }

        let decremented = sqlx::query(
            r#"
            UPDATE products
            SET inventory_count = inventory_count - 1
            WHERE id = ?1 AND inventory_count > 0
            "#,
        )
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!(cart_id, product_id, "Item unavailable at checkout");
            return Ok(SaleOutcome::OutOfStock);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(cart_id, product_id, "Item sold");
        Ok(SaleOutcome::Sold)
    }

    /// Deletes a cart together with its items and session binding.
    ///
    /// ## Returns
    /// * `Ok(true)` - Cart deleted
    /// * `Ok(false)` - No such cart
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(cart_id = id, "Deleting shopping cart");

        let result = sqlx::query("DELETE FROM shopping_carts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
