//! Storage abstraction for events and attendances.
//!
//! # Implementations
//!
//! - `PostgresEventRepository` (in `eventmaker-postgres`): production storage
//! - `InMemoryEventRepository` (in `eventmaker-testing`): fast, deterministic tests
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! repository can be shared as `Arc<dyn EventRepository>` in application state.

use crate::code::EventCode;
use crate::types::{Attendance, Event, EventDetails, EventId, NewEvent, UserId, UserSummary};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by repository methods.
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Errors reported by a storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Another event already uses the code.
    #[error("Event code already in use: {0}")]
    DuplicateCode(EventCode),

    /// Connection or query failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Result of an atomic join attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new attendance was created.
    Joined(Attendance),
    /// No event has the given ID.
    EventNotFound,
    /// Capacity is set and already reached.
    AtCapacity,
    /// The user already attends the event.
    AlreadyJoined,
}

/// Event and attendance storage.
///
/// # Atomicity
///
/// [`join_event`](Self::join_event) must perform the existence check, the
/// capacity check, the duplicate check and the insert as one atomic step:
/// concurrent joins must never push the attendance count past capacity.
pub trait EventRepository: Send + Sync {
    /// Look up a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> RepositoryFuture<'a, Option<UserSummary>>;

    /// Insert a new event.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::DuplicateCode`] if the code is taken
    /// - [`RepositoryError::Database`] if the query fails
    fn insert_event(&self, event: NewEvent) -> RepositoryFuture<'_, Event>;

    /// Load the public projection of the event with `code`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    fn find_event_details_by_code<'a>(
        &'a self,
        code: &'a EventCode,
    ) -> RepositoryFuture<'a, Option<EventDetails>>;

    /// Atomically admit `user_id` to `event_id`.
    ///
    /// Checks run in this order: event exists, capacity, duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the transaction fails.
    fn join_event(
        &self,
        event_id: EventId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepositoryFuture<'_, JoinOutcome>;

    /// Load the attendance of `user_id` at `event_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    fn find_attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryFuture<'_, Option<Attendance>>;
}

/// Probes used by the readiness check.
pub trait StoreHealth: Send + Sync {
    /// Round-trip to the store.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the store is unreachable.
    fn ping(&self) -> RepositoryFuture<'_, ()>;

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the query fails.
    fn count_users(&self) -> RepositoryFuture<'_, i64>;
}
