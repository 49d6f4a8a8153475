//! # Product Store
//!
//! Catalog operations.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("  Fallout 4 ", price: -5, inventory: None)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewProduct::normalized ─── title "Fallout 4", price 0.00, inventory 0 │
//! │       │                     (blank / >200 chars → ValidationError)     │
//! │       ▼                                                                 │
//! │  unique_titles? ─── insert_if_title_free, taken → DuplicateTitle       │
//! │       │                                                                 │
//! │       ▼  (otherwise)                                                    │
//! │  products().insert                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{CoreError, Money, NewProduct, Product, ValidationError};
use storefront_db::{Database, DbError};
use tracing::{debug, info};

use super::ServiceResult;

/// Catalog service.
#[derive(Debug, Clone)]
pub struct ProductStore {
    db: Database,
    unique_titles: bool,
}

impl ProductStore {
    /// Creates a product store; `unique_titles` turns on duplicate-title rejection.
    pub fn new(db: Database, unique_titles: bool) -> Self {
        ProductStore { db, unique_titles }
    }

    /// Creates a product.
    ///
    /// Absent or negative `price` and `inventory_count` are stored as zero.
    pub async fn create(
        &self,
        title: &str,
        price: Option<Money>,
        inventory_count: Option<i64>,
    ) -> ServiceResult<Product> {
        let new = NewProduct::normalized(title, price, inventory_count)?;

        let products = self.db.products();
        let product = if self.unique_titles {
            products
                .insert_if_title_free(&new)
                .await?
                .ok_or_else(|| CoreError::DuplicateTitle(new.title.clone()))?
        } else {
            products.insert(&new).await?
        };

        info!(
            id = product.id,
            title = %product.title,
            price = %product.price(),
            inventory = product.inventory_count,
            "Product created"
        );
        Ok(product)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> ServiceResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    /// Gets a product by exact title (surrounding whitespace ignored).
    pub async fn find_by_title(&self, title: &str) -> ServiceResult<Product> {
        let title = title.trim();
        self.db
            .products()
            .get_by_title(title)
            .await?
            .ok_or_else(|| CoreError::ProductTitleNotFound(title.to_string()).into())
    }

    /// Finds a product by id or title; the id wins when both are given.
    pub async fn lookup(&self, id: Option<i64>, title: Option<&str>) -> ServiceResult<Product> {
        match (id, title) {
            (Some(id), _) => self.get(id).await,
            (None, Some(title)) => self.find_by_title(title).await,
            (None, None) => Err(ValidationError::Required {
                field: "id or title".to_string(),
            }
            .into()),
        }
    }

    /// Lists products in insertion order, optionally only those with
    /// inventory strictly above `inventory_min`.
    pub async fn list(&self, inventory_min: Option<i64>) -> ServiceResult<Vec<Product>> {
        Ok(self.db.products().list(inventory_min).await?)
    }

    /// Deletes a product that no cart holds.
    ///
    /// ## Returns
    /// The confirmation message, or `ProductNotFound` / `ProductInCart`.
    pub async fn delete(&self, id: i64) -> ServiceResult<String> {
        let products = self.db.products();

        // Existence first, so a missing product reports NotFound.
        self.get(id).await?;

        let carts = products.cart_reference_count(id).await?;
        if carts > 0 {
            debug!(id, carts, "Refusing to delete product held by carts");
            return Err(CoreError::ProductInCart {
                product_id: id,
                carts,
            }
            .into());
        }

        match products.delete(id).await {
            Ok(()) => {}
            // A cart picked it up between the check and the delete.
            Err(DbError::ForeignKeyViolation { .. }) => {
                return Err(CoreError::ProductInCart {
                    product_id: id,
                    carts: 1,
                }
                .into())
            }
            Err(DbError::NotFound { .. }) => return Err(CoreError::ProductNotFound(id).into()),
            Err(err) => return Err(err.into()),
        }

        info!(id, "Product deleted");
        Ok(format!("Product with id {} was deleted successfully", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{database, product};
    use crate::services::ServiceError;

    fn money(s: &str) -> Option<Money> {
        Some(s.parse().unwrap())
    }

    #[tokio::test]
    async fn test_create_clamps_price_and_inventory() {
        let store = ProductStore::new(database().await, true);

        let created = store.create("Test", money("-5"), None).await.unwrap();
        assert_eq!(created.price_cents, 0);
        assert_eq!(created.inventory_count, 0);

        let created = store.create("Test 1", money("1"), Some(0)).await.unwrap();
        assert_eq!(created.price().to_decimal_string(), "1.00");

        let created = store.create("Test 2", money("5.00000"), Some(-4)).await.unwrap();
        assert_eq!(created.price_cents, 500);
        assert_eq!(created.inventory_count, 0);
    }

    #[tokio::test]
    async fn test_create_trims_and_validates_title() {
        let store = ProductStore::new(database().await, true);

        let created = store.create("  FIFA 19  ", money("29.99"), Some(5)).await.unwrap();
        assert_eq!(created.title, "FIFA 19");

        let err = store.create("   ", None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));

        let err = store.create(&"x".repeat(201), None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_titles_follow_flag() {
        let db = database().await;

        let strict = ProductStore::new(db.clone(), true);
        strict.create("Fallout 4", money("39.99"), Some(5)).await.unwrap();
        let err = strict.create("Fallout 4", money("1"), Some(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::DuplicateTitle(t)) if t == "Fallout 4"));

        let relaxed = ProductStore::new(db, false);
        relaxed.create("Fallout 4", money("1"), Some(1)).await.unwrap();
        assert_eq!(relaxed.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creates() {
        let store = ProductStore::new(database().await, true);

        let (a, b) = tokio::join!(
            store.create("Fallout 4", money("39.99"), Some(5)),
            store.create("Fallout 4", money("19.99"), Some(1)),
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        assert_eq!(store.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_price_above_maximum() {
        let store = ProductStore::new(database().await, true);

        let err = store
            .create("Expensive", money("60000000000000000"), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(store.list(None).await.unwrap().is_empty());

        let created = store.create("Pricey", money("99999999.99"), Some(1)).await.unwrap();
        assert_eq!(created.price_cents, 99_999_999_99);
    }

    #[tokio::test]
    async fn test_get_and_find() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let store = ProductStore::new(db, true);

        assert_eq!(store.get(fifa.id).await.unwrap(), fifa);
        assert_eq!(store.find_by_title("FIFA 19").await.unwrap(), fifa);

        assert!(matches!(
            store.get(fifa.id + 1).await,
            Err(ServiceError::Core(CoreError::ProductNotFound(_)))
        ));
        assert!(matches!(
            store.find_by_title("FIFA 20").await,
            Err(ServiceError::Core(CoreError::ProductTitleNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_lookup_prefers_id() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let fallout = product(&db, "Fallout 4", "39.99", 5).await;
        let store = ProductStore::new(db, true);

        let found = store.lookup(Some(fifa.id), Some("Fallout 4")).await.unwrap();
        assert_eq!(found.id, fifa.id);

        let found = store.lookup(None, Some("Fallout 4")).await.unwrap();
        assert_eq!(found.id, fallout.id);

        assert!(matches!(
            store.lookup(None, None).await,
            Err(ServiceError::Core(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_inventory() {
        let db = database().await;
        product(&db, "FIFA 19", "29.99", 5).await;
        product(&db, "Gears of War 3", "9.99", 0).await;
        let store = ProductStore::new(db, true);

        assert_eq!(store.list(None).await.unwrap().len(), 2);

        let in_stock = store.list(Some(0)).await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].title, "FIFA 19");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let store = ProductStore::new(db, true);

        let message = store.delete(fifa.id).await.unwrap();
        assert_eq!(
            message,
            format!("Product with id {} was deleted successfully", fifa.id)
        );

        assert!(matches!(
            store.delete(fifa.id).await,
            Err(ServiceError::Core(CoreError::ProductNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_refused_while_in_cart() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let cart = db.carts().create().await.unwrap();
        db.carts().add_item(cart.id, fifa.id).await.unwrap();
        let store = ProductStore::new(db.clone(), true);

        let err = store.delete(fifa.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::ProductInCart { carts: 1, .. })
        ));

        // Still there.
        assert!(store.get(fifa.id).await.is_ok());
    }
}
