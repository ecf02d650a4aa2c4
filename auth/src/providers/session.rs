//! Session store trait.

use super::{AuthFuture, Session};

/// Session store.
///
/// Sessions are looked up by the digest of their bearer token.
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the write fails.
    fn create_session<'a>(&'a self, session: &'a Session) -> AuthFuture<'a, ()>;

    /// Load the session whose token digest is `token_hash`.
    ///
    /// Expired sessions are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the query fails.
    fn find_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, Option<Session>>;

    /// Delete the session whose token digest is `token_hash`.
    ///
    /// Returns `true` if a session was removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the query fails.
    fn delete_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, bool>;
}
