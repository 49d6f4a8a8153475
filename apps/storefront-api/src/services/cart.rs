//! # Cart Manager
//!
//! Keeps cart contents, product inventory and cart totals consistent.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Manager Operations                              │
//! │                                                                         │
//! │  Request               Cart Manager                 Effect              │
//! │  ───────               ────────────                 ──────              │
//! │                                                                         │
//! │  GET  /cart ─────────► get_or_create_cart() ──────► bind empty cart    │
//! │  POST /cart ─────────► create_cart(items) ────────► bind + fill cart   │
//! │  POST /cart/items ───► add_to_cart(id) ───────────► in stock? insert   │
//! │  DELETE /cart/items ─► remove_from_cart(id) ──────► delete row         │
//! │  POST /cart/checkout ► checkout() ────────────────► sell item by item  │
//! │  DELETE /carts/{id} ─► delete_cart(id) ───────────► cart + binding gone│
//! │                                                                         │
//! │  Every structural change ends in recompute_total():                    │
//! │      total = sum(price of current items)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Checkout
//! Items are sold one at a time. For each item, the removal from the cart
//! and the inventory decrement (only if stock remains) commit together;
//! there is no rollback across items. Items that are out of stock at
//! checkout time stay in the cart; items removed concurrently are skipped.

use storefront_core::{
    cart_total, CheckoutOutcome, CheckoutSummary, CoreError, Product, ShoppingCart,
};
use storefront_db::{Database, SaleOutcome};
use tracing::{debug, info, warn};

use super::ServiceResult;

/// Cart service. Every call names the session it acts for.
#[derive(Debug, Clone)]
pub struct CartManager {
    db: Database,
}

impl CartManager {
    /// Creates a cart manager over the given database.
    pub fn new(db: Database) -> Self {
        CartManager { db }
    }

    // =========================================================================
    // Session Carts
    // =========================================================================

    /// Returns the session's cart, creating and binding an empty one if needed.
    pub async fn get_or_create_cart(&self, session_id: &str) -> ServiceResult<ShoppingCart> {
        if let Some(cart_id) = self.bound_cart_id(session_id).await? {
            return self.get_cart(cart_id).await;
        }

        let cart = self.db.carts().create().await?;
        self.db.sessions().bind(session_id, cart.id).await?;

        info!(session_id, cart_id = cart.id, "Bound new empty cart to session");
        Ok(cart)
    }

    /// Creates and binds a cart filled with the given products.
    ///
    /// Unknown and out-of-stock ids are skipped; repeated ids collapse into
    /// one item. If the session already has a cart, that cart is returned
    /// unchanged and `item_ids` is ignored. Nothing is written when the
    /// selected items have no representable total.
    pub async fn create_cart(
        &self,
        session_id: &str,
        item_ids: &[i64],
    ) -> ServiceResult<ShoppingCart> {
        if let Some(cart_id) = self.bound_cart_id(session_id).await? {
            if !item_ids.is_empty() {
                warn!(
                    session_id,
                    cart_id,
                    ignored = item_ids.len(),
                    "Session already has a cart; ignoring initial items"
                );
            }
            return self.get_cart(cart_id).await;
        }

        let mut selected: Vec<Product> = Vec::new();
        for &product_id in item_ids {
            if selected.iter().any(|p| p.id == product_id) {
                continue;
            }
            match self.db.products().get_by_id(product_id).await? {
                Some(product) if product.is_in_stock() => selected.push(product),
                Some(_) => debug!(product_id, "Skipping out-of-stock product"),
                None => debug!(product_id, "Skipping unknown product"),
            }
        }
        cart_total(&selected)?;

        let carts = self.db.carts();
        let cart = carts.create().await?;
        self.db.sessions().bind(session_id, cart.id).await?;

        for product in &selected {
            carts.add_item(cart.id, product.id).await?;
        }

        let cart = self.recompute_total(cart.id).await?;
        info!(
            session_id,
            cart_id = cart.id,
            items = cart.item_count(),
            total = %cart.total(),
            "Created cart"
        );
        Ok(cart)
    }

    /// Adds a product to the session's cart.
    ///
    /// A product with no inventory is silently not added; adding a product
    /// that is already in the cart changes nothing. An item whose price would
    /// push the total out of range is refused before it is stored.
    pub async fn add_to_cart(
        &self,
        session_id: &str,
        product_id: i64,
    ) -> ServiceResult<ShoppingCart> {
        let cart_id = self.require_bound_cart(session_id).await?;
        let product = self.require_product(product_id).await?;

        if !product.is_in_stock() {
            debug!(cart_id, product_id, "Product out of stock; cart unchanged");
            return self.get_cart(cart_id).await;
        }

        let carts = self.db.carts();
        let mut items = carts.items(cart_id).await?;
        if items.iter().all(|item| item.id != product_id) {
            items.push(product);
            cart_total(&items)?;

            if carts.add_item(cart_id, product_id).await? {
                debug!(cart_id, product_id, "Item added");
            }
        }

        self.recompute_total(cart_id).await
    }

    /// Removes a product from the session's cart (no-op if it isn't there).
    pub async fn remove_from_cart(
        &self,
        session_id: &str,
        product_id: i64,
    ) -> ServiceResult<ShoppingCart> {
        let cart_id = self.require_bound_cart(session_id).await?;
        self.require_product(product_id).await?;

        if self.db.carts().remove_item(cart_id, product_id).await? {
            debug!(cart_id, product_id, "Item removed");
        }

        self.recompute_total(cart_id).await
    }

    /// Sells every in-stock item of the session's cart.
    ///
    /// ## Returns
    /// ```text
    /// no bound cart   → (None,        NoCart)
    /// empty cart      → (Some(cart),  EmptyCart)       nothing touched
    /// otherwise       → (Some(cart),  Completed(sold / unavailable ids))
    /// ```
    pub async fn checkout(
        &self,
        session_id: &str,
    ) -> ServiceResult<(Option<ShoppingCart>, CheckoutOutcome)> {
        let Some(cart_id) = self.bound_cart_id(session_id).await? else {
            return Ok((None, CheckoutOutcome::NoCart));
        };

        let cart = self.get_cart(cart_id).await?;
        if cart.is_empty() {
            return Ok((Some(cart), CheckoutOutcome::EmptyCart));
        }

        let carts = self.db.carts();
        let mut summary = CheckoutSummary::default();

        for product_id in cart.item_ids() {
            match carts.sell_item(cart_id, product_id).await? {
                SaleOutcome::Sold => summary.sold_product_ids.push(product_id),
                SaleOutcome::OutOfStock => summary.unavailable_product_ids.push(product_id),
                SaleOutcome::NotInCart => {}
            }
        }

        let cart = self.recompute_total(cart_id).await?;

        if !summary.is_complete() {
            warn!(
                cart_id,
                unavailable = ?summary.unavailable_product_ids,
                "Items left in cart: out of stock at checkout"
            );
        }
        info!(
            session_id,
            cart_id,
            sold = summary.sold_product_ids.len(),
            unavailable = summary.unavailable_product_ids.len(),
            remaining_total = %cart.total(),
            "Checkout completed"
        );
        Ok((Some(cart), CheckoutOutcome::Completed(summary)))
    }

    // =========================================================================
    // Carts by Id
    // =========================================================================

    /// Deletes a cart. Inventory is not restored.
    ///
    /// Any session bound to the cart becomes unbound and gets a fresh cart on
    /// its next `get_or_create_cart`.
    pub async fn delete_cart(&self, cart_id: i64) -> ServiceResult<String> {
        if self.db.carts().delete(cart_id).await? {
            info!(cart_id, "Cart deleted");
            Ok(format!("Cart with id {} was deleted successfully", cart_id))
        } else {
            Ok(format!("Cart with id {} does not exist", cart_id))
        }
    }

    /// Gets a cart by id.
    pub async fn get_cart(&self, cart_id: i64) -> ServiceResult<ShoppingCart> {
        self.db
            .carts()
            .get(cart_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_id).into())
    }

    /// Lists every cart.
    pub async fn list_carts(&self) -> ServiceResult<Vec<ShoppingCart>> {
        Ok(self.db.carts().list_all().await?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Derives the total from the current items and stores it.
    ///
    /// This is the only place a cart total is written.
    async fn recompute_total(&self, cart_id: i64) -> ServiceResult<ShoppingCart> {
        let carts = self.db.carts();
        let items = carts.items(cart_id).await?;
        carts.store_total(cart_id, cart_total(&items)?).await?;
        self.get_cart(cart_id).await
    }

    async fn bound_cart_id(&self, session_id: &str) -> ServiceResult<Option<i64>> {
        Ok(self.db.sessions().cart_for(session_id).await?)
    }

    async fn require_bound_cart(&self, session_id: &str) -> ServiceResult<i64> {
        self.bound_cart_id(session_id)
            .await?
            .ok_or_else(|| CoreError::NoActiveCart.into())
    }

    async fn require_product(&self, product_id: i64) -> ServiceResult<Product> {
        self.db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id).into())
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
    use storefront_core::{Money, NewProduct};

    const SESSION: &str = "session-1";

    fn assert_total_matches_items(cart: &ShoppingCart) {
        let expected: i64 = cart.items.iter().map(|p| p.price_cents).sum();
        assert_eq!(cart.total_cents, expected);
    }

    /// Inserts a row directly, bypassing the catalog's price limit.
    async fn raw_product(db: &Database, title: &str, price_cents: i64) -> Product {
        let new = NewProduct {
            title: title.to_string(),
            price: Money::from_cents(price_cents),
            inventory_count: 5,
        };
        db.products().insert(&new).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let manager = CartManager::new(database().await);

        let first = manager.get_or_create_cart(SESSION).await.unwrap();
        assert!(first.is_empty());
        assert_eq!(first.total_cents, 0);

        let second = manager.get_or_create_cart(SESSION).await.unwrap();
        assert_eq!(first.id, second.id);

        let other = manager.get_or_create_cart("session-2").await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_create_cart_with_items() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let fallout = product(&db, "Fallout 4", "39.99", 5).await;
        let battlefront = product(&db, "Star Wars Battlefront ||", "19.99", 5).await;
        let gears = product(&db, "Gears of War 3", "9.99", 0).await;
        let manager = CartManager::new(db);

        let cart = manager
            .create_cart(
                SESSION,
                &[fifa.id, fallout.id, fifa.id, gears.id, 999, battlefront.id],
            )
            .await
            .unwrap();

        assert_eq!(cart.item_ids(), vec![fifa.id, fallout.id, battlefront.id]);
        assert_eq!(cart.total().to_decimal_string(), "89.97");
        assert_total_matches_items(&cart);
    }

    #[tokio::test]
    async fn test_create_cart_on_bound_session_ignores_items() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let manager = CartManager::new(db);

        let existing = manager.get_or_create_cart(SESSION).await.unwrap();
        let cart = manager.create_cart(SESSION, &[fifa.id]).await.unwrap();

        assert_eq!(cart.id, existing.id);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_remove_keep_total_consistent() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let fallout = product(&db, "Fallout 4", "39.99", 5).await;
        let manager = CartManager::new(db);
        manager.get_or_create_cart(SESSION).await.unwrap();

        let cart = manager.add_to_cart(SESSION, fifa.id).await.unwrap();
        assert_eq!(cart.total_cents, 2999);

        let cart = manager.add_to_cart(SESSION, fallout.id).await.unwrap();
        assert_eq!(cart.total().to_decimal_string(), "69.98");
        assert_total_matches_items(&cart);

        // Adding again is a no-op.
        let cart = manager.add_to_cart(SESSION, fifa.id).await.unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_cents, 6998);

        let cart = manager.remove_from_cart(SESSION, fifa.id).await.unwrap();
        assert_eq!(cart.item_ids(), vec![fallout.id]);
        assert_eq!(cart.total_cents, 3999);

        // Removing something not in the cart changes nothing.
        let cart = manager.remove_from_cart(SESSION, fifa.id).await.unwrap();
        assert_eq!(cart.item_ids(), vec![fallout.id]);
        assert_eq!(cart.total_cents, 3999);

        let cart = manager.remove_from_cart(SESSION, fallout.id).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[tokio::test]
    async fn test_add_refuses_total_overflow() {
        let db = database().await;
        let a = raw_product(&db, "A", i64::MAX / 2 + 1).await;
        let b = raw_product(&db, "B", i64::MAX / 2 + 1).await;
        let manager = CartManager::new(db);
        manager.get_or_create_cart(SESSION).await.unwrap();

        manager.add_to_cart(SESSION, a.id).await.unwrap();
        assert!(matches!(
            manager.add_to_cart(SESSION, b.id).await,
            Err(ServiceError::Core(CoreError::TotalOutOfRange { items: 2 }))
        ));

        // The refused item was never stored, so the total still matches.
        let cart = manager.get_or_create_cart(SESSION).await.unwrap();
        assert_eq!(cart.item_ids(), vec![a.id]);
        assert_total_matches_items(&cart);
    }

    #[tokio::test]
    async fn test_create_cart_refuses_total_overflow() {
        let db = database().await;
        let a = raw_product(&db, "A", i64::MAX / 2 + 1).await;
        let b = raw_product(&db, "B", i64::MAX / 2 + 1).await;
        let manager = CartManager::new(db);

        assert!(matches!(
            manager.create_cart(SESSION, &[a.id, b.id]).await,
            Err(ServiceError::Core(CoreError::TotalOutOfRange { .. }))
        ));
        assert!(manager.list_carts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_out_of_stock_is_silent() {
        let db = database().await;
        let gears = product(&db, "Gears of War 3", "9.99", 0).await;
        let manager = CartManager::new(db);
        manager.get_or_create_cart(SESSION).await.unwrap();

        let cart = manager.add_to_cart(SESSION, gears.id).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[tokio::test]
    async fn test_mutations_require_bound_cart_and_known_product() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let manager = CartManager::new(db);

        assert!(matches!(
            manager.add_to_cart(SESSION, fifa.id).await,
            Err(ServiceError::Core(CoreError::NoActiveCart))
        ));
        assert!(matches!(
            manager.remove_from_cart(SESSION, fifa.id).await,
            Err(ServiceError::Core(CoreError::NoActiveCart))
        ));

        manager.get_or_create_cart(SESSION).await.unwrap();
        assert!(matches!(
            manager.add_to_cart(SESSION, 999).await,
            Err(ServiceError::Core(CoreError::ProductNotFound(999)))
        ));
        assert!(matches!(
            manager.remove_from_cart(SESSION, 999).await,
            Err(ServiceError::Core(CoreError::ProductNotFound(999)))
        ));
    }

    #[tokio::test]
    async fn test_checkout_without_cart() {
        let manager = CartManager::new(database().await);

        let (cart, outcome) = manager.checkout(SESSION).await.unwrap();
        assert!(cart.is_none());
        assert_eq!(outcome, CheckoutOutcome::NoCart);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let manager = CartManager::new(database().await);
        manager.get_or_create_cart(SESSION).await.unwrap();

        let (cart, outcome) = manager.checkout(SESSION).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::EmptyCart);
        assert_eq!(outcome.message(), "Shopping cart is empty");
        assert_eq!(cart.unwrap().total_cents, 0);
    }

    #[tokio::test]
    async fn test_full_checkout() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 5).await;
        let fallout = product(&db, "Fallout 4", "39.99", 5).await;
        let battlefront = product(&db, "Star Wars Battlefront ||", "19.99", 5).await;
        let manager = CartManager::new(db.clone());

        let cart = manager
            .create_cart(SESSION, &[fifa.id, fallout.id, battlefront.id])
            .await
            .unwrap();
        assert_eq!(cart.total().to_decimal_string(), "89.97");

        let (cart, outcome) = manager.checkout(SESSION).await.unwrap();
        let cart = cart.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents, 0);
        assert_eq!(outcome.message(), "Shopping cart was successfully completed");
        assert_eq!(
            outcome.summary().unwrap().sold_product_ids,
            vec![fifa.id, fallout.id, battlefront.id]
        );

        for id in [fifa.id, fallout.id, battlefront.id] {
            let after = db.products().get_by_id(id).await.unwrap().unwrap();
            assert_eq!(after.inventory_count, 4);
        }
    }

    #[tokio::test]
    async fn test_checkout_leaves_sold_out_items() {
        let db = database().await;
        let fifa = product(&db, "FIFA 19", "29.99", 1).await;
        let fallout = product(&db, "Fallout 4", "39.99", 5).await;
        let manager = CartManager::new(db.clone());

        manager
            .create_cart(SESSION, &[fifa.id, fallout.id])
            .await
            .unwrap();

        // Another session buys the last FIFA first.
        manager.create_cart("other", &[fifa.id]).await.unwrap();
        manager.checkout("other").await.unwrap();

        let (cart, outcome) = manager.checkout(SESSION).await.unwrap();
        let cart = cart.unwrap();
        let summary = outcome.summary().unwrap();

        assert_eq!(summary.sold_product_ids, vec![fallout.id]);
        assert_eq!(summary.unavailable_product_ids, vec![fifa.id]);
        assert_eq!(cart.item_ids(), vec![fifa.id]);
        assert_eq!(cart.total_cents, 2999);

        let fifa_after = db.products().get_by_id(fifa.id).await.unwrap().unwrap();
        assert_eq!(fifa_after.inventory_count, 0);
    }

    #[tokio::test]
    async fn test_delete_cart_unbinds_session() {
        let manager = CartManager::new(database().await);
        let cart = manager.get_or_create_cart(SESSION).await.unwrap();

        let message = manager.delete_cart(cart.id).await.unwrap();
        assert_eq!(
            message,
            format!("Cart with id {} was deleted successfully", cart.id)
        );

        let message = manager.delete_cart(cart.id).await.unwrap();
        assert_eq!(message, format!("Cart with id {} does not exist", cart.id));

        assert!(matches!(
            manager.get_cart(cart.id).await,
            Err(ServiceError::Core(CoreError::CartNotFound(_)))
        ));

        let fresh = manager.get_or_create_cart(SESSION).await.unwrap();
        assert_ne!(fresh.id, cart.id);
    }

    #[tokio::test]
    async fn test_list_carts() {
        let manager = CartManager::new(database().await);
        manager.get_or_create_cart("a").await.unwrap();
        manager.get_or_create_cart("b").await.unwrap();

        assert_eq!(manager.list_carts().await.unwrap().len(), 2);
    }
}
