//! # EventMaker Core
//!
//! Domain types and business rules for EventMaker: events with shareable join
//! codes, attendances limited by an optional capacity, and the service that
//! ties them to a storage backend.
//!
//! ## Core Concepts
//!
//! - **Event**: a titled gathering owned by a user, identified publicly by a
//!   six-character [`EventCode`](code::EventCode)
//! - **Attendance**: the join record linking one user to one event
//! - **Repository**: the storage capability, injected as a trait object
//! - **Service**: validation, code assignment, and join admission
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌────────────────────┐     ┌──────────────────────┐
//! │ HTTP handlers    │ ──▶ │ EventService       │ ──▶ │ dyn EventRepository  │
//! │ (server crate)   │     │ - validation       │     │ - Postgres (prod)    │
//! │                  │     │ - code generation  │     │ - In-memory (tests)  │
//! └──────────────────┘     │ - join admission   │     └──────────────────────┘
//!                          └────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use eventmaker_core::{service::EventService, validation::CreateEventRequest};
//!
//! let service = EventService::new(repository, clock);
//! let event = service
//!     .create_event("host@example.com", CreateEventRequest::new("Launch", "2030-01-01T12:00:00"))
//!     .await?;
//! assert_eq!(event.code.as_str().len(), 6);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod error;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

pub use code::EventCode;
pub use error::{EventError, Result};
pub use repository::{EventRepository, JoinOutcome, RepositoryError, StoreHealth};
pub use service::{EventPolicy, EventService};
pub use types::{
    Attendance, AttendanceCount, AttendanceId, AttendanceStatus, CreatorSummary, Event,
    EventDetails, EventId, NewEvent, UserId, UserSummary,
};
pub use validation::{CreateEventRequest, FieldError, ValidationErrors};

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Environment module - injected dependencies for deterministic testing.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use eventmaker_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
