//! # Session Repository
//!
//! Persists which cart each session is working on.
//!
//! A session has at most one active cart. The binding disappears on its own
//! when the cart is deleted (`ON DELETE CASCADE`), which is how a session
//! goes back to UNBOUND.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for session to cart bindings.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Returns the id of the cart bound to this session, if any.
    pub async fn cart_for(&self, session_id: &str) -> DbResult<Option<i64>> {
        let cart_id: Option<i64> =
            sqlx::query_scalar("SELECT cart_id FROM sessions WHERE session_id = ?1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(cart_id)
    }

    /// Binds a session to a cart, replacing any previous binding.
    pub async fn bind(&self, session_id: &str, cart_id: i64) -> DbResult<()> {
        debug!(session_id, cart_id, "Binding session to cart");

        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, cart_id, bound_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(session_id) DO UPDATE SET
                cart_id = excluded.cart_id,
                bound_at = excluded.bound_at
            "#,
        )
        .bind(session_id)
        .bind(cart_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_bind_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sessions = db.sessions();
        let cart = db.carts().create().await.unwrap();

        assert_eq!(sessions.cart_for("abc").await.unwrap(), None);

        sessions.bind("abc", cart.id).await.unwrap();
        assert_eq!(sessions.cart_for("abc").await.unwrap(), Some(cart.id));
        assert_eq!(sessions.cart_for("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rebind_replaces_binding() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sessions = db.sessions();
        let first = db.carts().create().await.unwrap();
        let second = db.carts().create().await.unwrap();

        sessions.bind("abc", first.id).await.unwrap();
        sessions.bind("abc", second.id).await.unwrap();

        assert_eq!(sessions.cart_for("abc").await.unwrap(), Some(second.id));
    }

    #[tokio::test]
    async fn test_cart_delete_unbinds_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cart = db.carts().create().await.unwrap();
        db.sessions().bind("abc", cart.id).await.unwrap();

        db.carts().delete(cart.id).await.unwrap();

        assert_eq!(db.sessions().cart_for("abc").await.unwrap(), None);
    }
}
