//! Error types for sign-in and session operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for magic-link sign-in and sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Sign-in Errors
    // ═══════════════════════════════════════════════════════════

    /// The email address is malformed.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Public registration is disabled and the email is unknown.
    #[error("Registration is closed")]
    RegistrationClosed,

    /// Magic link has expired.
    #[error("Magic link has expired")]
    MagicLinkExpired,

    /// Magic link token is unknown or already used.
    #[error("Invalid magic link token")]
    MagicLinkInvalid,

    // ═══════════════════════════════════════════════════════════
    // Session Errors
    // ═══════════════════════════════════════════════════════════

    /// Missing, unknown or expired session token.
    #[error("Unauthorized")]
    Unauthorized,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Email delivery failed.
    #[error("Email error: {0}")]
    EmailError(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AuthError {
    /// Returns `true` if the caller should be asked to sign in again.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::MagicLinkExpired | Self::MagicLinkInvalid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures() {
        assert!(AuthError::Unauthorized.is_authentication_failure());
        assert!(AuthError::MagicLinkInvalid.is_authentication_failure());
        assert!(!AuthError::RegistrationClosed.is_authentication_failure());
        assert!(!AuthError::DatabaseError("down".into()).is_authentication_failure());
    }
}
