//! Readiness probes against `PostgreSQL`.

use eventmaker_core::repository::{RepositoryError, RepositoryFuture, StoreHealth};
use sqlx::PgPool;

/// [`StoreHealth`] over a connection pool.
#[derive(Clone, Debug)]
pub struct PostgresStoreHealth {
    pool: PgPool,
}

impl PostgresStoreHealth {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StoreHealth for PostgresStoreHealth {
    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(format!("Ping failed: {e}")))?;
            Ok(())
        })
    }

    fn count_users(&self) -> RepositoryFuture<'_, i64> {
        Box::pin(async move {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(format!("Failed to count users: {e}")))?;
            #[allow(clippy::cast_precision_loss)] // Gauge only, exactness not needed
            metrics::gauge!("users.registered").set(count as f64);
            Ok(count)
        })
    }
}
