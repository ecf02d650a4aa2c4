//! Magic-link sign-in and session lifecycle.
//!
//! # Flow
//!
//! ```text
//! send_magic_link(email) ──▶ TokenStore.store ──▶ EmailProvider.send
//!                                                         │
//!        user clicks link ◀──────────────────────────────┘
//!              │
//! verify_magic_link(token) ──▶ TokenStore.consume ──▶ UserRepository.upsert_verified
//!                                                         │
//!                                           SessionStore.create ──▶ session token
//!
//! authenticate(session token) ──▶ SessionStore.find
//! logout(session token)       ──▶ SessionStore.delete
//! ```
//!
//! Raw tokens only ever travel to the user. Stores see
//! [`hash_token`](crate::utils::hash_token) digests.

use crate::config::{AuthSecret, MagicLinkConfig};
use crate::error::{AuthError, Result};
use crate::providers::{
    EmailProvider, MagicLinkToken, Session, SessionId, SessionStore, TokenStore, User,
    UserRepository,
};
use crate::utils::{generate_token, hash_token, is_valid_email, normalize_email};
use chrono::{DateTime, Duration, Utc};
use eventmaker_core::environment::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External dependencies of [`AuthService`].
#[derive(Clone)]
pub struct AuthProviders {
    /// Delivers magic links.
    pub email: Arc<dyn EmailProvider>,
    /// Holds pending magic-link tokens.
    pub tokens: Arc<dyn TokenStore>,
    /// Holds sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Holds users.
    pub users: Arc<dyn UserRepository>,
}

/// Outcome of [`AuthService::send_magic_link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicLinkSent {
    /// Normalized recipient.
    pub email: String,
    /// When the link stops working.
    pub expires_at: DateTime<Utc>,
    /// The link itself, only when links are exposed for testing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_link: Option<String>,
}

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Bearer token to hand to the client. Not stored anywhere.
    pub session_token: String,
    /// Stored session record.
    pub session: Session,
    /// Signed-in user.
    pub user: User,
}

/// Passwordless authentication service.
#[derive(Clone)]
pub struct AuthService {
    config: MagicLinkConfig,
    secret: AuthSecret,
    providers: AuthProviders,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Create a new service.
    #[must_use]
    pub fn new(
        config: MagicLinkConfig,
        secret: AuthSecret,
        providers: AuthProviders,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            secret,
            providers,
            clock,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MagicLinkConfig {
        &self.config
    }

    /// Issue a single-use sign-in token for `email` and deliver it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidEmail`] for a malformed address
    /// - [`AuthError::RegistrationClosed`] for an unknown address while
    ///   public registration is off
    /// - [`AuthError::EmailError`] / [`AuthError::DatabaseError`] from providers
    #[tracing::instrument(skip(self))]
    pub async fn send_magic_link(&self, email: &str) -> Result<MagicLinkSent> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        if !self.config.allow_new_users
            && self.providers.users.find_by_email(&email).await?.is_none()
        {
            info!("Sign-in refused: registration is closed");
            metrics::counter!("auth.magic_links", "outcome" => "registration_closed").increment(1);
            return Err(AuthError::RegistrationClosed);
        }

        let token = generate_token();
        let now = self.clock.now();
        let record = MagicLinkToken {
            token_hash: hash_token(&self.secret, &token),
            email: email.clone(),
            expires_at: expiry(now, self.config.token_ttl)?,
            created_at: now,
        };
        self.providers.tokens.store_token(&record).await?;

        let link = self.config.magic_link(&token);
        if let Err(error) = self
            .providers
            .email
            .send_magic_link(&email, &link, record.expires_at)
            .await
        {
            warn!(error = %error, "Magic link delivery failed");
            metrics::counter!("auth.magic_links", "outcome" => "delivery_failed").increment(1);
            return Err(error);
        }

        info!(expires_at = %record.expires_at, "Magic link sent");
        metrics::counter!("auth.magic_links", "outcome" => "sent").increment(1);

        Ok(MagicLinkSent {
            email,
            expires_at: record.expires_at,
            magic_link: self.config.expose_links_for_testing.then_some(link),
        })
    }

    /// Redeem a magic-link token and sign the user in.
    ///
    /// The token is consumed before any other check, so a second attempt
    /// with the same token always fails.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MagicLinkInvalid`] for an unknown or already used token
    /// - [`AuthError::MagicLinkExpired`] once the token's TTL has passed
    /// - [`AuthError::DatabaseError`] from the stores
    #[tracing::instrument(skip_all)]
    pub async fn verify_magic_link(&self, token: &str) -> Result<SessionGrant> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MagicLinkInvalid);
        }

        let token_hash = hash_token(&self.secret, token);
        let Some(record) = self.providers.tokens.consume_token(&token_hash).await? else {
            debug!("Unknown or used magic link");
            metrics::counter!("auth.verifications", "outcome" => "invalid").increment(1);
            return Err(AuthError::MagicLinkInvalid);
        };

        let now = self.clock.now();
        if record.is_expired(now) {
            debug!(email = %record.email, "Expired magic link");
            metrics::counter!("auth.verifications", "outcome" => "expired").increment(1);
            return Err(AuthError::MagicLinkExpired);
        }

        let user = self
            .providers
            .users
            .upsert_verified(&record.email, now)
            .await?;
        let grant = self.issue_session(user).await?;

        info!(user_id = %grant.user.id, "User signed in");
        metrics::counter!("auth.verifications", "outcome" => "signed_in").increment(1);
        Ok(grant)
    }

    /// Create a session for `user` and return its bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DatabaseError`] if the session cannot be stored.
    pub async fn issue_session(&self, user: User) -> Result<SessionGrant> {
        let session_token = generate_token();
        let now = self.clock.now();
        let session = Session {
            id: SessionId::new(),
            token_hash: hash_token(&self.secret, &session_token),
            user_id: user.id,
            email: user.email.clone(),
            created_at: now,
            expires_at: expiry(now, self.config.session_ttl)?,
        };
        self.providers.sessions.create_session(&session).await?;

        Ok(SessionGrant {
            session_token,
            session,
            user,
        })
    }

    /// Resolve a bearer token to its live session.
    ///
    /// Expired sessions are deleted on sight.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthorized`] for an empty, unknown or expired token
    /// - [`AuthError::DatabaseError`] from the session store
    pub async fn authenticate(&self, token: &str) -> Result<Session> {
        if token.is_empty() {
            return Err(AuthError::Unauthorized);
        }

        let token_hash = hash_token(&self.secret, token);
        let Some(session) = self.providers.sessions.find_session(&token_hash).await? else {
            return Err(AuthError::Unauthorized);
        };

        if session.is_expired(self.clock.now()) {
            debug!(session_id = %session.id, "Session expired");
            self.providers.sessions.delete_session(&token_hash).await?;
            return Err(AuthError::Unauthorized);
        }

        Ok(session)
    }

    /// End the session behind `token`.
    ///
    /// Returns `true` if a session existed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DatabaseError`] from the session store.
    pub async fn logout(&self, token: &str) -> Result<bool> {
        let removed = self
            .providers
            .sessions
            .delete_session(&hash_token(&self.secret, token))
            .await?;
        if removed {
            info!("Session ended");
        }
        Ok(removed)
    }
}

/// `now + ttl`, or a configuration error when the result is not representable.
fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        AuthError::ConfigurationError(format!("Lifetime of {ttl} overflows the calendar"))
    })
}
