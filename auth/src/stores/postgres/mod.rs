//! PostgreSQL storage implementations.
//!
//! Tables are created by the workspace migrations (`users`,
//! `magic_link_tokens`, `sessions`). Queries are checked at runtime, so the
//! crate builds without a live database.

pub mod session;
pub mod token;
pub mod user;

// Re-exports
pub use session::PostgresSessionStore;
pub use token::PostgresTokenStore;
pub use user::PostgresUserRepository;

use crate::error::AuthError;

/// Wrap a sqlx failure with the operation that hit it.
fn db_error(context: &str, error: &sqlx::Error) -> AuthError {
    AuthError::DatabaseError(format!("{context}: {error}"))
}
