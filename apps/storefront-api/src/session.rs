//! # Session Middleware
//!
//! Identifies the caller so the Cart Manager can find their cart.
//!
//! ```text
//! request ── x-session-id: abc ──► SessionId("abc") ──► handler
//! request ── (no header) ────────► SessionId(<uuid v4>) ──► handler
//!
//! response ◄── x-session-id: <same id>
//! ```
//!
//! Clients keep the echoed id and send it back to stay on the same cart.

use axum::extract::{FromRequestParts, Request};
use axum::http::header::HeaderName;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the session id in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

/// Longest client-supplied session id that is accepted as-is.
const MAX_SESSION_ID_LENGTH: usize = 128;

/// The caller's session id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a new random session id.
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    /// Accepts a client-supplied id if it is non-blank and reasonably short.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.len() > MAX_SESSION_ID_LENGTH {
            return None;
        }
        Some(SessionId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Resolves the session id, stores it in the request extensions and echoes
/// it on the response.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(SessionId::parse)
        .unwrap_or_else(SessionId::generate);

    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(session.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }
    response
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Session middleware is not installed"))
    }
}
