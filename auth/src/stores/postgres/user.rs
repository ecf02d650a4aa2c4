//! PostgreSQL user repository implementation.
//!
//! # Example
//!
//! ```no_run
//! use eventmaker_auth::stores::postgres::PostgresUserRepository;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/eventmaker").await?;
//! let repo = PostgresUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

use super::db_error;
use crate::error::Result;
use crate::providers::{AuthFuture, User, UserRepository};
use chrono::{DateTime, Utc};
use eventmaker_core::UserId;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL user repository.
///
/// Reads and writes the same `users` table the event repository joins
/// against, so a verified sign-in is immediately a valid event creator.
#[derive(Clone, Debug)]
pub struct PostgresUserRepository {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new PostgreSQL user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<User> {
    let decode = |e: sqlx::Error| db_error("Failed to decode user", &e);
    Ok(User {
        id: UserId(row.try_get("id").map_err(decode)?),
        email: row.try_get("email").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        email_verified: row.try_get("email_verified").map_err(decode)?,
        created_at: row.try_get("created_at").map_err(decode)?,
        updated_at: row.try_get("updated_at").map_err(decode)?,
    })
}

impl UserRepository for PostgresUserRepository {
    fn find_by_email<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Option<User>> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                SELECT id, email, name, email_verified, created_at, updated_at
                FROM users
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get user", &e))?;

            row.as_ref().map(row_to_user).transpose()
        })
    }

    fn upsert_verified<'a>(
        &'a self,
        email: &'a str,
        verified_at: DateTime<Utc>,
    ) -> AuthFuture<'a, User> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                INSERT INTO users (id, email, email_verified, created_at, updated_at)
                VALUES ($1, $2, $3, $3, $3)
                ON CONFLICT (email) DO UPDATE
                    SET email_verified = EXCLUDED.email_verified,
                        updated_at = EXCLUDED.updated_at
                RETURNING id, email, name, email_verified, created_at, updated_at
                ",
            )
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(verified_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to upsert user", &e))?;

            row_to_user(&row)
        })
    }
}
