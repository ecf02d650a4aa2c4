//! Authentication configuration.
//!
//! Configuration values are provided by the application, not hardcoded.

use chrono::Duration;
use std::fmt;

/// Path the verification handler is mounted at, relative to `base_url`.
pub const DEFAULT_VERIFY_PATH: &str = "/api/auth/magic-link/verify";

/// Magic Link authentication configuration.
#[derive(Debug, Clone)]
pub struct MagicLinkConfig {
    /// Base URL for magic link generation (e.g., "https://events.example.com").
    ///
    /// Magic links will be formatted as: `{base_url}{verify_path}?token={token}`
    pub base_url: String,

    /// Path of the verification endpoint.
    pub verify_path: String,

    /// Token time-to-live.
    ///
    /// Default: 10 minutes
    pub token_ttl: Duration,

    /// Session duration after successful authentication.
    ///
    /// Default: 30 days
    pub session_ttl: Duration,

    /// Whether unknown emails may sign in (and so register).
    ///
    /// Default: `true`
    pub allow_new_users: bool,

    /// Return the magic link in the send response instead of only emailing it.
    ///
    /// Only for local development and end-to-end tests.
    pub expose_links_for_testing: bool,
}

impl MagicLinkConfig {
    /// Create new Magic Link configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set token time-to-live.
    #[must_use]
    pub const fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set session duration.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Allow or refuse sign-in for unknown emails.
    #[must_use]
    pub const fn with_new_users(mut self, allow: bool) -> Self {
        self.allow_new_users = allow;
        self
    }

    /// Echo magic links in API responses.
    #[must_use]
    pub const fn with_exposed_links(mut self, expose: bool) -> Self {
        self.expose_links_for_testing = expose;
        self
    }

    /// Full link for `token`.
    #[must_use]
    pub fn magic_link(&self, token: &str) -> String {
        format!(
            "{}{}?token={token}",
            self.base_url.trim_end_matches('/'),
            self.verify_path
        )
    }
}

impl Default for MagicLinkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            verify_path: DEFAULT_VERIFY_PATH.to_string(),
            token_ttl: Duration::minutes(10),
            session_ttl: Duration::days(30),
            allow_new_users: true,
            expose_links_for_testing: false,
        }
    }
}

/// Server-side secret mixed into every stored token digest.
///
/// `Debug` output is redacted.
#[derive(Clone)]
pub struct AuthSecret(String);

impl AuthSecret {
    /// Wrap a secret value.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthSecret(**redacted**)")
    }
}

/// SMTP settings for [`SmtpEmailProvider`](crate::providers::SmtpEmailProvider).
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP server host.
    pub host: String,
    /// SMTP server port (587 for STARTTLS, 465 for implicit TLS).
    pub port: u16,
    /// Authentication username.
    pub username: String,
    /// Authentication password.
    pub password: String,
    /// Sender address.
    pub from_email: String,
    /// Sender display name.
    pub from_name: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish_non_exhaustive()
    }
}
