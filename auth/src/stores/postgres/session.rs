//! PostgreSQL session store.

use super::db_error;
use crate::providers::{AuthFuture, Session, SessionId, SessionStore};
use eventmaker_core::UserId;
use sqlx::{PgPool, Row};

/// PostgreSQL session store.
#[derive(Clone, Debug)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Create a new PostgreSQL session store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for PostgresSessionStore {
    fn create_session<'a>(&'a self, session: &'a Session) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query(
                r"
                INSERT INTO sessions (id, token_hash, user_id, email, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(session.id.0)
            .bind(&session.token_hash)
            .bind(session.user_id.0)
            .bind(&session.email)
            .bind(session.created_at)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create session", &e))?;
            Ok(())
        })
    }

    fn find_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, Option<Session>> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                SELECT id, token_hash, user_id, email, created_at, expires_at
                FROM sessions
                WHERE token_hash = $1
                ",
            )
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get session", &e))?;

            let Some(row) = row else {
                return Ok(None);
            };
            let decode = |e: sqlx::Error| db_error("Failed to decode session", &e);
            Ok(Some(Session {
                id: SessionId(row.try_get("id").map_err(decode)?),
                token_hash: row.try_get("token_hash").map_err(decode)?,
                user_id: UserId(row.try_get("user_id").map_err(decode)?),
                email: row.try_get("email").map_err(decode)?,
                created_at: row.try_get("created_at").map_err(decode)?,
                expires_at: row.try_get("expires_at").map_err(decode)?,
            }))
        })
    }

    fn delete_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
                .bind(token_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to delete session", &e))?;
            Ok(result.rows_affected() > 0)
        })
    }
}
