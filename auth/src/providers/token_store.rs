//! Token store trait.
//!
//! Storage for one-time magic-link tokens with atomic single-use semantics.

use super::{AuthFuture, MagicLinkToken};

/// Token store.
///
/// # Implementation Notes
///
/// - Tokens are ephemeral (10 minute TTL by default)
/// - **CRITICAL**: `consume_token()` MUST be atomic (`DELETE ... RETURNING`
///   or a mutex), so a token can be redeemed at most once
/// - Expired tokens are still returned by `consume_token()`; the caller
///   decides how to report them
pub trait TokenStore: Send + Sync {
    /// Store a new token record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the write fails.
    fn store_token<'a>(&'a self, token: &'a MagicLinkToken) -> AuthFuture<'a, ()>;

    /// Atomically remove and return the record with `token_hash`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the query fails.
    fn consume_token<'a>(&'a self, token_hash: &'a str)
    -> AuthFuture<'a, Option<MagicLinkToken>>;
}
