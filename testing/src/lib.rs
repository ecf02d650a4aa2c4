//! # EventMaker Testing
//!
//! Testing utilities for EventMaker.
//!
//! This crate provides:
//! - [`InMemoryEventRepository`]: storage with the same semantics as Postgres
//! - [`FixedClock`]: deterministic time
//! - Tracing setup for test output
//!
//! ## Example
//!
//! ```ignore
//! use eventmaker_core::{EventService, CreateEventRequest};
//! use eventmaker_testing::{InMemoryEventRepository, test_clock};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_create() {
//!     let repository = InMemoryEventRepository::new();
//!     repository.seed_user("host@example.com", None);
//!     let service = EventService::new(Arc::new(repository), Arc::new(test_clock()));
//!
//!     let event = service
//!         .create_event("host@example.com", CreateEventRequest::new("Launch", "2030-01-01"))
//!         .await
//!         .unwrap();
//!     assert_eq!(event.title, "Launch");
//! }
//! ```

use chrono::{DateTime, Utc};
use eventmaker_core::environment::Clock;

mod repository_mocks;

pub use repository_mocks::InMemoryEventRepository;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventmaker_testing::mocks::FixedClock;
    /// use eventmaker_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers.
pub mod helpers {
    /// Route `tracing` output to the test harness.
    ///
    /// Safe to call from every test; only the first call installs a subscriber.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "eventmaker=debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_tracing;
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use eventmaker_core::repository::{EventRepository, JoinOutcome, StoreHealth};
    use eventmaker_core::types::{EventId, NewEvent, UserId};
    use eventmaker_core::EventCode;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    fn new_event(creator_id: UserId, code: &str, capacity: Option<i32>) -> NewEvent {
        NewEvent {
            id: EventId::new(),
            title: "Launch".to_string(),
            description: None,
            location: None,
            start_date: test_clock().now(),
            end_date: None,
            capacity,
            is_public: false,
            code: code.parse::<EventCode>().unwrap(),
            creator_id,
            created_at: test_clock().now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_code_is_reported() {
        let repository = InMemoryEventRepository::new();
        let host = repository.seed_user("host@example.com", None);

        repository
            .insert_event(new_event(host.id, "ABC234", None))
            .await
            .unwrap();
        let err = repository
            .insert_event(new_event(host.id, "ABC234", None))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            eventmaker_core::RepositoryError::DuplicateCode(_)
        ));
        assert_eq!(repository.event_count(), 1);
    }

    #[tokio::test]
    async fn test_join_checks_capacity_before_duplicate() {
        let repository = InMemoryEventRepository::new();
        let host = repository.seed_user("host@example.com", None);
        let event = repository
            .insert_event(new_event(host.id, "ABC234", Some(1)))
            .await
            .unwrap();

        let first = repository
            .join_event(event.id, host.id, test_clock().now())
            .await
            .unwrap();
        assert!(matches!(first, JoinOutcome::Joined(_)));

        // Same user again on a full event reports capacity first
        let again = repository
            .join_event(event.id, host.id, test_clock().now())
            .await
            .unwrap();
        assert_eq!(again, JoinOutcome::AtCapacity);

        let missing = repository
            .join_event(EventId::new(), host.id, test_clock().now())
            .await
            .unwrap();
        assert_eq!(missing, JoinOutcome::EventNotFound);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_health_checks() {
        let repository = InMemoryEventRepository::new();
        repository.seed_user("a@example.com", None);
        assert_eq!(repository.count_users().await.unwrap(), 1);

        repository.set_unavailable(true);
        assert!(repository.ping().await.is_err());
        assert!(repository.count_users().await.is_err());
    }
}
