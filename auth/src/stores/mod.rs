//! Storage implementations for the auth providers.
//!
//! - **User Repository** (PostgreSQL) - Accounts shared with the events tables
//! - **Token Store** (PostgreSQL) - Magic link digests with atomic consumption
//! - **Session Store** (PostgreSQL) - Session digests with expiry

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports
#[cfg(feature = "postgres")]
pub use postgres::{PostgresSessionStore, PostgresTokenStore, PostgresUserRepository};
