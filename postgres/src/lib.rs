//! `PostgreSQL` storage for EventMaker.
//!
//! This crate provides the production implementation of the
//! [`EventRepository`](eventmaker_core::EventRepository) and
//! [`StoreHealth`](eventmaker_core::StoreHealth) traits from
//! `eventmaker-core`. Queries are checked at runtime so the crate builds
//! without a live database.
//!
//! - Event insertion with a unique join code
//! - Atomic join admission under a row lock
//! - Schema migrations embedded from `migrations/`
//!
//! # Example
//!
//! ```ignore
//! use eventmaker_postgres::{PostgresEventRepository, run_migrations};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = sqlx::PgPool::connect("postgres://localhost/eventmaker").await?;
//!     run_migrations(&pool).await?;
//!     let repository = PostgresEventRepository::from_pool(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event_repository;
mod health;

pub use event_repository::PostgresEventRepository;
pub use health::PostgresStoreHealth;

use sqlx::PgPool;
use thiserror::Error;

/// Errors raised while preparing the database.
#[derive(Error, Debug)]
pub enum PostgresError {
    /// Applying a migration failed.
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply every pending migration from the workspace `migrations/` directory.
///
/// # Errors
///
/// Returns [`PostgresError::Migration`] if a migration cannot be applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), PostgresError> {
    sqlx::migrate!("../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
