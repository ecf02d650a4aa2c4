//! Event service: creation, lookup by code, and join admission.

use crate::code::EventCode;
use crate::environment::Clock;
use crate::error::{EventError, Result};
use crate::repository::{EventRepository, JoinOutcome, RepositoryError};
use crate::types::{Attendance, Event, EventDetails, EventId, NewEvent, UserId};
use crate::validation::CreateEventRequest;
use std::sync::Arc;

/// How many codes are tried before giving up on an insert.
pub const MAX_CODE_ATTEMPTS: u32 = 5;

/// Server-side rules that deployments may switch on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventPolicy {
    /// Reject events whose start date is not after the current time.
    pub require_future_start: bool,
}

/// Business operations on events and attendances.
///
/// Storage and time are injected so the service runs unchanged against
/// Postgres in production and in-memory fakes in tests.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
    policy: EventPolicy,
}

impl EventService {
    /// Create a service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            policy: EventPolicy::default(),
        }
    }

    /// Replace the policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: EventPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> &EventPolicy {
        &self.policy
    }

    /// Validate `request` and store a new event owned by `creator_email`.
    ///
    /// A fresh code is drawn for each attempt; a code collision triggers a
    /// retry, up to [`MAX_CODE_ATTEMPTS`].
    ///
    /// # Errors
    ///
    /// - [`EventError::Validation`] with every failed field
    /// - [`EventError::CreatorNotFound`] if no user has `creator_email`
    /// - [`EventError::CodeSpaceExhausted`] if every attempt collided
    /// - [`EventError::Repository`] on storage failure
    #[tracing::instrument(skip(self, request), fields(creator = %creator_email))]
    pub async fn create_event(
        &self,
        creator_email: &str,
        request: CreateEventRequest,
    ) -> Result<Event> {
        let now = self.clock.now();
        let validated = request.validate(now, &self.policy)?;

        let creator = self
            .repository
            .find_user_by_email(creator_email)
            .await?
            .ok_or(EventError::CreatorNotFound)?;

        let id = EventId::new();
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let candidate = NewEvent {
                id,
                title: validated.title.clone(),
                description: validated.description.clone(),
                location: validated.location.clone(),
                start_date: validated.start_date,
                end_date: validated.end_date,
                capacity: validated.capacity,
                is_public: validated.is_public,
                code: EventCode::generate(),
                creator_id: creator.id,
                created_at: now,
            };

            match self.repository.insert_event(candidate).await {
                Ok(event) => {
                    metrics::counter!("events.created").increment(1);
                    tracing::info!(
                        event_id = %event.id,
                        code = %event.code,
                        attempt,
                        "Event created"
                    );
                    return Ok(event);
                }
                Err(RepositoryError::DuplicateCode(code)) => {
                    metrics::counter!("events.code_collisions").increment(1);
                    tracing::warn!(%code, attempt, "Event code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(attempts = MAX_CODE_ATTEMPTS, "Exhausted event code attempts");
        Err(EventError::CodeSpaceExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Public projection of the event with `code`.
    ///
    /// Malformed codes are treated as unknown.
    ///
    /// # Errors
    ///
    /// - [`EventError::EventNotFound`] if no event matches
    /// - [`EventError::Repository`] on storage failure
    pub async fn get_event_by_code(&self, code: &str) -> Result<EventDetails> {
        let Some(code) = EventCode::parse(code) else {
            tracing::debug!(code, "Malformed event code");
            return Err(EventError::EventNotFound);
        };

        self.repository
            .find_event_details_by_code(&code)
            .await?
            .ok_or(EventError::EventNotFound)
    }

    /// Admit `user_id` to `event_id`.
    ///
    /// # Errors
    ///
    /// In check order:
    /// - [`EventError::EventNotFound`]
    /// - [`EventError::AtCapacity`]
    /// - [`EventError::AlreadyJoined`]
    /// - [`EventError::Repository`] on storage failure
    #[tracing::instrument(skip(self), fields(event_id = %event_id, user_id = %user_id))]
    pub async fn join_event(&self, event_id: EventId, user_id: UserId) -> Result<Attendance> {
        let outcome = self
            .repository
            .join_event(event_id, user_id, self.clock.now())
            .await?;

        match outcome {
            JoinOutcome::Joined(attendance) => {
                metrics::counter!("events.joins", "outcome" => "joined").increment(1);
                tracing::info!(attendance_id = %attendance.id, "User joined event");
                Ok(attendance)
            }
            JoinOutcome::EventNotFound => Err(EventError::EventNotFound),
            JoinOutcome::AtCapacity => {
                metrics::counter!("events.joins", "outcome" => "at_capacity").increment(1);
                Err(EventError::AtCapacity)
            }
            JoinOutcome::AlreadyJoined => {
                metrics::counter!("events.joins", "outcome" => "already_joined").increment(1);
                Err(EventError::AlreadyJoined)
            }
        }
    }

    /// Attendance of `user_id` at `event_id`.
    ///
    /// # Errors
    ///
    /// - [`EventError::AttendanceNotFound`] if the user has not joined
    /// - [`EventError::Repository`] on storage failure
    pub async fn get_attendance(&self, event_id: EventId, user_id: UserId) -> Result<Attendance> {
        self.repository
            .find_attendance(event_id, user_id)
            .await?
            .ok_or(EventError::AttendanceNotFound)
    }
}
