//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Queries (GET)                     Mutations (POST / DELETE)            │
//! │  ─────────────                     ─────────────────────────            │
//! │  /health                           POST   /products                     │
//! │  /products?inventory_count_gt=N    DELETE /products/{id}                │
//! │  /products/lookup?id=&title=       POST   /cart            {items?}     │
//! │  /products/{id}                    POST   /cart/items      {productId}  │
//! │  /cart                             DELETE /cart/items/{product_id}      │
//! │  /carts                            POST   /cart/checkout                │
//! │  /carts/{id}                       DELETE /carts/{id}                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod carts;
pub mod products;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use storefront_db::migrations::migration_status;
use storefront_db::MigrationStatus;

use crate::state::Storefront;

/// Body of operations that only report an outcome message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Builds the route table (state is attached by the caller).
pub fn router() -> Router<Storefront> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/lookup", get(products::lookup_product))
        .route(
            "/products/{id}",
            get(products::get_product).delete(products::delete_product),
        )
        .route("/cart", get(carts::get_cart).post(carts::create_cart))
        .route("/cart/items", post(carts::add_item))
        .route("/cart/items/{product_id}", delete(carts::remove_item))
        .route("/cart/checkout", post(carts::checkout))
        .route("/carts", get(carts::list_carts))
        .route(
            "/carts/{id}",
            get(carts::get_cart_by_id).delete(carts::delete_cart),
        )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub migrations: Option<MigrationStatus>,
}

async fn health(State(storefront): State<Storefront>) -> (StatusCode, Json<HealthResponse>) {
    let db = storefront.database();
    let database = db.health_check().await;
    let migrations = if database {
        migration_status(db.pool()).await.ok()
    } else {
        None
    };

    let healthy = database && migrations.is_some_and(|m| m.is_current());
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            database,
            migrations,
        }),
    )
}
