//! Email provider trait.

use super::AuthFuture;
use chrono::{DateTime, Utc};

/// Email provider.
///
/// This trait abstracts over email delivery (SMTP in production, console
/// output in development, a recorder in tests).
pub trait EmailProvider: Send + Sync {
    /// Send a sign-in email carrying `magic_link`.
    ///
    /// # Arguments
    ///
    /// - `to`: Recipient email address
    /// - `magic_link`: Complete verification URL including the token
    /// - `expires_at`: Token expiration timestamp
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailError` if:
    /// - An address cannot be parsed
    /// - The message cannot be built
    /// - Delivery fails
    fn send_magic_link<'a>(
        &'a self,
        to: &'a str,
        magic_link: &'a str,
        expires_at: DateTime<Utc>,
    ) -> AuthFuture<'a, ()>;
}
