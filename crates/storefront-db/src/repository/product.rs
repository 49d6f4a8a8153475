//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - Insert with the normalized creation input, optionally only when the
//!   title is still free (one statement, so concurrent creates cannot both win)
//! - Lookup by id or by title
//! - Listing with an optional inventory threshold
//! - Hard delete, with a cart-reference count for the guard above it
//!
//! ## Inventory Threshold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list(None)      → every product, insertion order                      │
//! │  list(Some(0))   → inventory_count > 0   (strictly greater)            │
//! │                                                                         │
//! │  FIFA 19           5   ✓                                               │
//! │  Fallout 4         5   ✓                                               │
//! │  Gears of War 3    0   ✗                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product and returns it with its generated id.
    ///
    /// The input is expected to be normalized already (see
    /// [`NewProduct::normalized`]); the schema's CHECK constraints reject
    /// anything that slipped through.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(title = %product.title, price = %product.price, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (title, price_cents, inventory_count, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, price_cents, inventory_count, created_at
            "#,
        )
        .bind(&product.title)
        .bind(product.price.cents())
        .bind(product.inventory_count)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!(id = inserted.id, "Product inserted");
        Ok(inserted)
    }

    /// Inserts a product unless one with the same title already exists.
    ///
    /// The existence check and the insert are a single statement.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Inserted
    /// * `Ok(None)` - Title already taken; nothing written
    pub async fn insert_if_title_free(&self, product: &NewProduct) -> DbResult<Option<Product>> {
        debug!(title = %product.title, "Inserting product with unique title");

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (title, price_cents, inventory_count, created_at)
            SELECT ?1, ?2, ?3, ?4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE title = ?1)
            RETURNING id, title, price_cents, inventory_count, created_at
            "#,
        )
        .bind(&product.title)
        .bind(product.price.cents())
        .bind(product.inventory_count)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price_cents, inventory_count, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by exact title.
    ///
    /// When uniqueness is not enforced several products can share a title;
    /// the oldest one wins.
    pub async fn get_by_title(&self, title: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price_cents, inventory_count, created_at
            FROM products
            WHERE title = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products in insertion order.
    ///
    /// With `inventory_above`, only products whose inventory is strictly
    /// greater than the threshold are returned.
    pub async fn list(&self, inventory_above: Option<i64>) -> DbResult<Vec<Product>> {
        debug!(?inventory_above, "Listing products");

        let products = match inventory_above {
            Some(threshold) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, title, price_cents, inventory_count, created_at
                    FROM products
                    WHERE inventory_count > ?1
                    ORDER BY id
                    "#,
                )
                .bind(threshold)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, title, price_cents, inventory_count, created_at
                    FROM products
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Counts the carts that currently hold this product.
    pub async fn cart_reference_count(&self, id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE product_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - No such product
    /// * `Err(DbError::ForeignKeyViolation)` - A cart still holds it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use storefront_core::Money;

    use crate::{Database, DbConfig};

    use super::*;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_product(title: &str, price_cents: i64, inventory: i64) -> NewProduct {
        NewProduct::normalized(title, Some(Money::from_cents(price_cents)), Some(inventory))
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup().await;
        let repo = db.products();

        let inserted = repo.insert(&new_product("FIFA 19", 2999, 5)).await.unwrap();
        assert!(inserted.id > 0);
        assert_eq!(inserted.title, "FIFA 19");
        assert_eq!(inserted.price_cents, 2999);
        assert_eq!(inserted.inventory_count, 5);

        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched, inserted);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_if_title_free() {
        let db = setup().await;
        let repo = db.products();

        let first = repo
            .insert_if_title_free(&new_product("Fallout 4", 3999, 5))
            .await
            .unwrap();
        assert!(first.is_some());

        let second = repo
            .insert_if_title_free(&new_product("Fallout 4", 1000, 1))
            .await
            .unwrap();
        assert!(second.is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_by_title_prefers_oldest() {
        let db = setup().await;
        let repo = db.products();

        let first = repo.insert(&new_product("Fallout 4", 3999, 5)).await.unwrap();
        repo.insert(&new_product("Fallout 4", 1000, 1)).await.unwrap();

        let found = repo.get_by_title("Fallout 4").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(repo.get_by_title("Fallout").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_threshold_is_strict() {
        let db = setup().await;
        let repo = db.products();

        repo.insert(&new_product("FIFA 19", 2999, 5)).await.unwrap();
        repo.insert(&new_product("Fallout 4", 3999, 1)).await.unwrap();
        repo.insert(&new_product("Gears of War 3", 999, 0)).await.unwrap();

        let titles = |products: Vec<Product>| -> Vec<String> {
            products.into_iter().map(|p| p.title).collect()
        };

        assert_eq!(repo.list(None).await.unwrap().len(), 3);
        assert_eq!(
            titles(repo.list(Some(0)).await.unwrap()),
            vec!["FIFA 19", "Fallout 4"]
        );
        assert_eq!(titles(repo.list(Some(1)).await.unwrap()), vec!["FIFA 19"]);
        assert!(repo.list(Some(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup().await;
        let repo = db.products();

        let product = repo.insert(&new_product("FIFA 19", 2999, 5)).await.unwrap();
        repo.delete(product.id).await.unwrap();

        assert!(repo.get_by_id(product.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(product.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_restricted_while_in_cart() {
        let db = setup().await;
        let product = db
            .products()
            .insert(&new_product("FIFA 19", 2999, 5))
            .await
            .unwrap();
        let cart = db.carts().create().await.unwrap();
        db.carts().add_item(cart.id, product.id).await.unwrap();

        assert_eq!(db.products().cart_reference_count(product.id).await.unwrap(), 1);

        let err = db.products().delete(product.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
