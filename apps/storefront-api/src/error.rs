//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /cart/items                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler → CartManager::add_to_cart                              │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  ServiceError::Core(NoActiveCart) ──────────┐                   │  │
//! │  │  ServiceError::Db(QueryFailed) ─────────────┼──► ApiError ─────►│  │
//! │  │                                             │   (logged if 5xx)  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄── 409 {"code":"NO_ACTIVE_CART","message":"No active shopping ..."}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_core::CoreError;
use storefront_db::DbError;

use crate::services::ServiceError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or cart not found (404)
    NotFound,

    /// Session has no cart yet (409)
    NoActiveCart,

    /// Product title already taken (409)
    DuplicateTitle,

    /// Product still held by a cart (409)
    ProductInCart,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::NoActiveCart | ErrorCode::DuplicateTitle | ErrorCode::ProductInCart => {
                StatusCode::CONFLICT
            }
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// Details of infrastructure failures are logged, not returned.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field } => {
                ApiError::validation(format!("Duplicate value for {}", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_)
            | CoreError::ProductTitleNotFound(_)
            | CoreError::CartNotFound(_) => ErrorCode::NotFound,
            CoreError::NoActiveCart => ErrorCode::NoActiveCart,
            CoreError::DuplicateTitle(_) => ErrorCode::DuplicateTitle,
            CoreError::ProductInCart { .. } => ErrorCode::ProductInCart,
            CoreError::TotalOutOfRange { .. } => ErrorCode::ValidationError,
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Db(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
