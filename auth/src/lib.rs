//! # EventMaker Authentication
//!
//! Passwordless sign-in by email magic link, and the sessions it produces.
//!
//! ## Features
//!
//! - **Passwordless**: single-use links, 10 minute default lifetime
//! - **Digest-only storage**: raw tokens never reach the database
//! - **Injectable**: email delivery and storage are trait objects
//! - **Testable**: in-memory mocks behind the `test-utils` feature
//!
//! ## Architecture
//!
//! ```text
//! HTTP (feature "axum") → AuthService → providers (email, tokens, sessions, users)
//! ```
//!
//! ## Example: Magic Link Login
//!
//! ```rust,ignore
//! use eventmaker_auth::*;
//!
//! // 1. Email a link
//! auth.send_magic_link("guest@example.com").await?;
//!
//! // 2. The user follows it
//! let grant = auth.verify_magic_link(&token_from_link).await?;
//!
//! // 3. Later requests carry the session token
//! let session = auth.authenticate(&grant.session_token).await?;
//! assert_eq!(session.email, "guest@example.com");
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod error;
pub mod providers;
pub mod service;
pub mod stores;
pub mod utils;

// Mock implementations (for testing)
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// HTTP layer
#[cfg(feature = "axum")]
pub mod extractor;
#[cfg(feature = "axum")]
pub mod handlers;
#[cfg(feature = "axum")]
pub mod router;

// Re-export main types for convenience
pub use config::{AuthSecret, MagicLinkConfig, SmtpConfig};
pub use error::{AuthError, Result};
pub use providers::{MagicLinkToken, Session, SessionId, User};
pub use service::{AuthProviders, AuthService, MagicLinkSent, SessionGrant};

#[cfg(feature = "axum")]
pub use extractor::SessionUser;
#[cfg(feature = "axum")]
pub use router::auth_router;
