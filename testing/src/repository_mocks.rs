//! In-memory event storage for fast, deterministic tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use eventmaker_core::code::EventCode;
use eventmaker_core::repository::{
    EventRepository, JoinOutcome, RepositoryError, RepositoryFuture, StoreHealth,
};
use eventmaker_core::types::{
    Attendance, AttendanceCount, Event, EventDetails, EventId, NewEvent, UserId, UserSummary,
};
use eventmaker_core::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, UserSummary>,
    events: HashMap<EventId, Event>,
    attendances: Vec<Attendance>,
    unavailable: bool,
    forced_collisions: u32,
}

impl State {
    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(RepositoryError::Database("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn attendance_count(&self, event_id: EventId) -> i64 {
        let count = self
            .attendances
            .iter()
            .filter(|a| a.event_id == event_id)
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }
}

/// In-memory [`EventRepository`] and [`StoreHealth`].
///
/// All state sits behind one lock, so [`join_event`](EventRepository::join_event)
/// is atomic in the same way the Postgres transaction is.
///
/// # Example
///
/// ```
/// use eventmaker_testing::InMemoryEventRepository;
///
/// let repository = InMemoryEventRepository::new();
/// let host = repository.seed_user("host@example.com", Some("Host"));
/// assert_eq!(repository.user_count(), 1);
/// assert_eq!(host.email, "host@example.com");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryEventRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a fresh ID.
    pub fn seed_user(&self, email: &str, name: Option<&str>) -> UserSummary {
        let user = UserSummary {
            id: UserId::new(),
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        self.insert_user(user.clone());
        user
    }

    /// Register an existing user record.
    pub fn insert_user(&self, user: UserSummary) {
        self.state.write().unwrap().users.insert(user.id, user);
    }

    /// Make every operation fail with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Report a code collision for the next `count` inserts.
    pub fn force_code_collisions(&self, count: u32) {
        self.state.write().unwrap().forced_collisions = count;
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.state.read().unwrap().users.len()
    }

    /// Number of stored events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.state.read().unwrap().events.len()
    }

    /// Number of attendances for `event_id`.
    #[must_use]
    pub fn attendance_count(&self, event_id: EventId) -> i64 {
        self.state.read().unwrap().attendance_count(event_id)
    }

    /// Stored event by ID.
    #[must_use]
    pub fn event(&self, event_id: EventId) -> Option<Event> {
        self.state.read().unwrap().events.get(&event_id).cloned()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> RepositoryFuture<'a, Option<UserSummary>> {
        Box::pin(async move {
            let state = self.state.read().unwrap();
            state.check_available()?;
            Ok(state.users.values().find(|u| u.email == email).cloned())
        })
    }

    fn insert_event(&self, event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.check_available()?;

            if state.forced_collisions > 0 {
                state.forced_collisions -= 1;
                return Err(RepositoryError::DuplicateCode(event.code));
            }
            if state.events.values().any(|e| e.code == event.code) {
                return Err(RepositoryError::DuplicateCode(event.code));
            }

            let event = event.into_event();
            state.events.insert(event.id, event.clone());
            Ok(event)
        })
    }

    fn find_event_details_by_code<'a>(
        &'a self,
        code: &'a EventCode,
    ) -> RepositoryFuture<'a, Option<EventDetails>> {
        Box::pin(async move {
            let state = self.state.read().unwrap();
            state.check_available()?;

            let Some(event) = state.events.values().find(|e| &e.code == code) else {
                return Ok(None);
            };
            let Some(creator) = state.users.get(&event.creator_id).cloned() else {
                return Err(RepositoryError::Database(format!(
                    "event {} references missing creator {}",
                    event.id, event.creator_id
                )));
            };

            Ok(Some(EventDetails {
                id: event.id,
                title: event.title.clone(),
                description: event.description.clone(),
                location: event.location.clone(),
                start_date: event.start_date,
                end_date: event.end_date,
                is_public: event.is_public,
                code: event.code.clone(),
                capacity: event.capacity,
                created_at: event.created_at,
                creator,
                count: AttendanceCount {
                    attendances: state.attendance_count(event.id),
                },
            }))
        })
    }

    fn join_event(
        &self,
        event_id: EventId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepositoryFuture<'_, JoinOutcome> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.check_available()?;

            let Some(event) = state.events.get(&event_id) else {
                return Ok(JoinOutcome::EventNotFound);
            };
            if event.is_full(state.attendance_count(event_id)) {
                return Ok(JoinOutcome::AtCapacity);
            }
            if state
                .attendances
                .iter()
                .any(|a| a.event_id == event_id && a.user_id == user_id)
            {
                return Ok(JoinOutcome::AlreadyJoined);
            }

            let attendance = Attendance::confirmed(event_id, user_id, now);
            state.attendances.push(attendance.clone());
            Ok(JoinOutcome::Joined(attendance))
        })
    }

    fn find_attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryFuture<'_, Option<Attendance>> {
        Box::pin(async move {
            let state = self.state.read().unwrap();
            state.check_available()?;
            Ok(state
                .attendances
                .iter()
                .find(|a| a.event_id == event_id && a.user_id == user_id)
                .cloned())
        })
    }
}

impl StoreHealth for InMemoryEventRepository {
    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async move { self.state.read().unwrap().check_available() })
    }

    fn count_users(&self) -> RepositoryFuture<'_, i64> {
        Box::pin(async move {
            let state = self.state.read().unwrap();
            state.check_available()?;
            Ok(i64::try_from(state.users.len()).unwrap_or(i64::MAX))
        })
    }
}
