//! Authentication providers.
//!
//! This module defines traits for all external dependencies used by the
//! auth system. These traits enable dependency injection and make the
//! sign-in logic testable.
//!
//! # Architecture
//!
//! Providers are **interfaces**, not implementations. [`AuthService`]
//! depends on these traits as `Arc<dyn _>` handles and the binary wires in
//! concrete implementations.
//!
//! ```text
//! ┌──────────────────┐      ┌─────────────────────────────────────┐
//! │ AuthService      │ ───▶ │ EmailProvider   (Console, SMTP)     │
//! │ - send link      │      │ TokenStore      (Postgres, mock)    │
//! │ - verify link    │      │ SessionStore    (Postgres, mock)    │
//! │ - authenticate   │      │ UserRepository  (Postgres, mock)    │
//! └──────────────────┘      └─────────────────────────────────────┘
//! ```
//!
//! This enables:
//! - **Testing**: Use mocks (in-memory, deterministic)
//! - **Production**: Use real services (PostgreSQL, SMTP)
//! - **Development**: Log magic links to the console
//!
//! # Dyn Compatibility
//!
//! Methods return boxed futures so providers can be stored as trait objects.
//!
//! [`AuthService`]: crate::service::AuthService

use crate::error::AuthError;
use chrono::{DateTime, Utc};
use eventmaker_core::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

pub mod console_email;
pub mod email;
pub mod session;
pub mod smtp_email;
pub mod token_store;
pub mod user;

// Re-export provider traits
pub use console_email::ConsoleEmailProvider;
pub use email::EmailProvider;
pub use session::SessionStore;
pub use smtp_email::SmtpEmailProvider;
pub use token_store::TokenStore;
pub use user::UserRepository;

/// Boxed future returned by provider methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send + 'a>>;

/// User data model.
///
/// Stored in PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,

    /// Email address (unique, normalized).
    pub email: String,

    /// Display name.
    pub name: Option<String>,

    /// When the email was last proven by a magic link.
    pub email_verified: Option<DateTime<Utc>>,

    /// Created timestamp.
    pub created_at: DateTime<Utc>,

    /// Updated timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Magic link token record.
///
/// Only the digest of the token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicLinkToken {
    /// Token hash (peppered SHA-256).
    pub token_hash: String,

    /// Email address the link was sent to.
    pub email: String,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,

    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

impl MagicLinkToken {
    /// Returns `true` once `now` reaches the expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session ID.
    pub id: SessionId,

    /// Digest of the bearer token.
    #[serde(skip_serializing, default)]
    pub token_hash: String,

    /// Signed-in user.
    pub user_id: UserId,

    /// Email of the signed-in user.
    pub email: String,

    /// Created timestamp.
    pub created_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` once `now` reaches the expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
