//! PostgreSQL magic-link token store.

use super::db_error;
use crate::providers::{AuthFuture, MagicLinkToken, TokenStore};
use sqlx::{PgPool, Row};

/// PostgreSQL token store.
///
/// `consume_token` is a single `DELETE ... RETURNING`, so two concurrent
/// redemptions of the same link cannot both succeed.
#[derive(Clone, Debug)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    /// Create a new PostgreSQL token store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TokenStore for PostgresTokenStore {
    fn store_token<'a>(&'a self, token: &'a MagicLinkToken) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query(
                r"
                INSERT INTO magic_link_tokens (token_hash, email, expires_at, created_at)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(&token.token_hash)
            .bind(&token.email)
            .bind(token.expires_at)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store token", &e))?;
            Ok(())
        })
    }

    fn consume_token<'a>(
        &'a self,
        token_hash: &'a str,
    ) -> AuthFuture<'a, Option<MagicLinkToken>> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                DELETE FROM magic_link_tokens
                WHERE token_hash = $1
                RETURNING token_hash, email, expires_at, created_at
                ",
            )
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to consume token", &e))?;

            let Some(row) = row else {
                return Ok(None);
            };
            let decode = |e: sqlx::Error| db_error("Failed to decode token", &e);
            Ok(Some(MagicLinkToken {
                token_hash: row.try_get("token_hash").map_err(decode)?,
                email: row.try_get("email").map_err(decode)?,
                expires_at: row.try_get("expires_at").map_err(decode)?,
                created_at: row.try_get("created_at").map_err(decode)?,
            }))
        })
    }
}
