//! User repository trait.

use super::{AuthFuture, User};
use chrono::{DateTime, Utc};

/// User repository.
///
/// This trait abstracts over user storage (PostgreSQL).
pub trait UserRepository: Send + Sync {
    /// Get user by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the query fails.
    fn find_by_email<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Option<User>>;

    /// Create the user for `email` if missing and mark the email verified.
    ///
    /// Idempotent: repeated calls return the same user with a refreshed
    /// `email_verified` timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the write fails.
    fn upsert_verified<'a>(
        &'a self,
        email: &'a str,
        verified_at: DateTime<Utc>,
    ) -> AuthFuture<'a, User>;
}
