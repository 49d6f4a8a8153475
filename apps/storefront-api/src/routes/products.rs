//! Product routes.
//!
//! | Route                              | Product Store |
//! |------------------------------------|---------------|
//! | `GET /products?inventory_count_gt` | `list`        |
//! | `GET /products/lookup?id=&title=`  | `lookup`      |
//! | `GET /products/{id}`               | `get`         |
//! | `POST /products`                   | `create`      |
//! | `DELETE /products/{id}`            | `delete`      |

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::money::decimal;
use storefront_core::{Money, Product};

use super::MessageResponse;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::Storefront;

// =============================================================================
// DTOs
// =============================================================================

/// Product as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub title: String,
    /// Two-digit decimal, e.g. `"29.99"`
    pub price: String,
    pub price_cents: i64,
    pub inventory_count: i64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            price: product.price().to_decimal_string(),
            id: product.id,
            title: product.title,
            price_cents: product.price_cents,
            inventory_count: product.inventory_count,
        }
    }
}

/// `POST /products` body.
///
/// `price` accepts a JSON number or string. A missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "decimal::deserialize_option")]
    pub price: Option<Money>,
    #[serde(default)]
    pub inventory_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub inventory_count_gt: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub id: Option<i64>,
    pub title: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn list_products(
    State(storefront): State<Storefront>,
    ApiQuery(query): ApiQuery<ListProductsQuery>,
) -> ApiResult<Json<Vec<ProductDto>>> {
    let products = storefront.products.list(query.inventory_count_gt).await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

pub async fn lookup_product(
    State(storefront): State<Storefront>,
    ApiQuery(query): ApiQuery<LookupQuery>,
) -> ApiResult<Json<ProductDto>> {
    let product = storefront
        .products
        .lookup(query.id, query.title.as_deref())
        .await?;
    Ok(Json(product.into()))
}

pub async fn get_product(
    State(storefront): State<Storefront>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ProductDto>> {
    let product = storefront.products.get(id).await?;
    Ok(Json(product.into()))
}

pub async fn create_product(
    State(storefront): State<Storefront>,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let product = storefront
        .products
        .create(&request.title, request.price, request.inventory_count)
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn delete_product(
    State(storefront): State<Storefront>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = storefront.products.delete(id).await?;
    Ok(Json(MessageResponse { message }))
}
