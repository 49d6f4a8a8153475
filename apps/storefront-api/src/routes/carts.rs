//! Cart routes.
//!
//! `/cart...` routes act on the caller's session cart; `/carts...` routes
//! address carts by id.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::ShoppingCart;

use super::products::ProductDto;
use super::MessageResponse;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, OptionalJson};
use crate::session::SessionId;
use crate::state::Storefront;

// =============================================================================
// DTOs
// =============================================================================

/// Cart as returned to clients; items are in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub id: i64,
    pub items: Vec<ProductDto>,
    /// Two-digit decimal, e.g. `"89.97"`
    pub total: String,
    pub total_cents: i64,
}

impl From<ShoppingCart> for CartDto {
    fn from(cart: ShoppingCart) -> Self {
        CartDto {
            total: cart.total().to_decimal_string(),
            id: cart.id,
            total_cents: cart.total_cents,
            items: cart.items.into_iter().map(ProductDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCartRequest {
    #[serde(default)]
    pub items: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i64,
}

/// `POST /cart/checkout` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub cart: Option<CartDto>,
    pub message: String,
    pub sold_product_ids: Vec<i64>,
    pub unavailable_product_ids: Vec<i64>,
}

// =============================================================================
// Session Cart Handlers
// =============================================================================

pub async fn get_cart(
    State(storefront): State<Storefront>,
    session: SessionId,
) -> ApiResult<Json<CartDto>> {
    let cart = storefront.carts.get_or_create_cart(session.as_str()).await?;
    Ok(Json(cart.into()))
}

/// The body is optional; an empty one creates an empty cart.
pub async fn create_cart(
    State(storefront): State<Storefront>,
    session: SessionId,
    OptionalJson(request): OptionalJson<CreateCartRequest>,
) -> ApiResult<(StatusCode, Json<CartDto>)> {
    let items = request.map(|r| r.items).unwrap_or_default();
    let cart = storefront
        .carts
        .create_cart(session.as_str(), &items)
        .await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

pub async fn add_item(
    State(storefront): State<Storefront>,
    session: SessionId,
    ApiJson(request): ApiJson<AddItemRequest>,
) -> ApiResult<Json<CartDto>> {
    let cart = storefront
        .carts
        .add_to_cart(session.as_str(), request.product_id)
        .await?;
    Ok(Json(cart.into()))
}

pub async fn remove_item(
    State(storefront): State<Storefront>,
    session: SessionId,
    ApiPath(product_id): ApiPath<i64>,
) -> ApiResult<Json<CartDto>> {
    let cart = storefront
        .carts
        .remove_from_cart(session.as_str(), product_id)
        .await?;
    Ok(Json(cart.into()))
}

pub async fn checkout(
    State(storefront): State<Storefront>,
    session: SessionId,
) -> ApiResult<Json<CheckoutResponse>> {
    let (cart, outcome) = storefront.carts.checkout(session.as_str()).await?;
    let summary = outcome.summary().cloned().unwrap_or_default();

    Ok(Json(CheckoutResponse {
        cart: cart.map(CartDto::from),
        message: outcome.message().to_string(),
        sold_product_ids: summary.sold_product_ids,
        unavailable_product_ids: summary.unavailable_product_ids,
    }))
}

// =============================================================================
// Carts by Id
// =============================================================================

pub async fn list_carts(State(storefront): State<Storefront>) -> ApiResult<Json<Vec<CartDto>>> {
    let carts = storefront.carts.list_carts().await?;
    Ok(Json(carts.into_iter().map(CartDto::from).collect()))
}

pub async fn get_cart_by_id(
    State(storefront): State<Storefront>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<CartDto>> {
    let cart = storefront.carts.get_cart(id).await?;
    Ok(Json(cart.into()))
}

pub async fn delete_cart(
    State(storefront): State<Storefront>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = storefront.carts.delete_cart(id).await?;
    Ok(Json(MessageResponse { message }))
}
