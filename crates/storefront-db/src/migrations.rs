//! # Database Migrations
//!
//! Embedded SQL migrations for the storefront.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (create if missing)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 001_initial_schema.sql  products, carts, items, sessions     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record each one                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Each migration runs in its own transaction; already-applied ones are
/// skipped, so this is safe to call on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Migration counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MigrationStatus {
    /// Migrations embedded in this build.
    pub total: usize,
    /// Migrations recorded as applied in the database.
    pub applied: usize,
}

impl MigrationStatus {
    /// True when nothing is pending.
    pub fn is_current(&self) -> bool {
        self.applied >= self.total
    }
}

/// Returns how many embedded migrations exist and how many are applied.
///
/// A database that was never migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok(MigrationStatus {
        total,
        applied: applied as usize,
    })
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    use super::*;

    #[tokio::test]
    async fn test_status_after_migrating() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let status = migration_status(db.pool()).await.unwrap();
        assert!(status.total >= 1);
        assert!(status.is_current());

        // Running again is a no-op.
        db.run_migrations().await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), status);
    }

    #[tokio::test]
    async fn test_status_without_migrations() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let status = migration_status(db.pool()).await.unwrap();
        assert_eq!(status.applied, 0);
        assert!(!status.is_current());
    }
}
