//! # Request Extractors
//!
//! Wrappers around axum's `Json`, `Path` and `Query` that reject with an
//! [`ApiError`] instead of axum's plain-text rejection, so malformed input
//! gets the same `{code, message}` body as every other failure.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /cart/items {"productId":"x"}                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ApiJson<AddItemRequest> ── JsonRejection ──► ApiError (400)           │
//! │                                                                         │
//! │  ◄── {"code":"VALIDATION_ERROR","message":"Failed to deserialize ..."} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

// =============================================================================
// Rejection Conversions
// =============================================================================

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

// =============================================================================
// Extractors
// =============================================================================

/// JSON body extractor.
///
/// ## Example
/// ```ignore
/// async fn add_item(ApiJson(request): ApiJson<AddItemRequest>) -> ApiResult<...> { ... }
/// ```
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// JSON body that may be left out entirely.
///
/// An empty or all-whitespace body yields `None`. Anything else must be valid
/// JSON for `T`; the `content-type` header is not required.
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }

        let Json(value) = Json::<T>::from_bytes(&body)?;
        Ok(OptionalJson(Some(value)))
    }
}

/// Path parameter extractor.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

/// Query string extractor.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}
