//! Error types for event operations.

use crate::repository::RepositoryError;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias for event operations.
pub type Result<T> = std::result::Result<T, EventError>;

/// Failure modes of [`EventService`](crate::service::EventService).
///
/// Display strings double as the user-facing messages of the HTTP layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    // ═══════════════════════════════════════════════════════════
    // Input Errors
    // ═══════════════════════════════════════════════════════════

    /// The create request failed field validation.
    #[error("Invalid event data")]
    Validation(ValidationErrors),

    // ═══════════════════════════════════════════════════════════
    // Lookup Errors
    // ═══════════════════════════════════════════════════════════

    /// No event matches the given ID or code.
    #[error("Event not found")]
    EventNotFound,

    /// The user has not joined the event.
    #[error("Attendance not found")]
    AttendanceNotFound,

    /// The authenticated email has no user record.
    #[error("User not found")]
    CreatorNotFound,

    // ═══════════════════════════════════════════════════════════
    // Business Rules
    // ═══════════════════════════════════════════════════════════

    /// The event has reached its capacity.
    #[error("This event is at capacity")]
    AtCapacity,

    /// The user already has an attendance for the event.
    #[error("You are already attending this event")]
    AlreadyJoined,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Every generated code collided with an existing one.
    #[error("Could not allocate a unique event code after {attempts} attempts")]
    CodeSpaceExhausted {
        /// Number of codes tried
        attempts: u32,
    },

    /// The storage backend failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EventError {
    /// Returns `true` for failures caused by the caller rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::CodeSpaceExhausted { .. } | Self::Repository(_))
    }
}

impl From<ValidationErrors> for EventError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_user_facing_text() {
        assert_eq!(EventError::EventNotFound.to_string(), "Event not found");
        assert_eq!(
            EventError::AtCapacity.to_string(),
            "This event is at capacity"
        );
        assert_eq!(
            EventError::AlreadyJoined.to_string(),
            "You are already attending this event"
        );
        assert_eq!(
            EventError::AttendanceNotFound.to_string(),
            "Attendance not found"
        );
    }

    #[test]
    fn test_system_errors_are_not_client_errors() {
        assert!(EventError::AtCapacity.is_client_error());
        assert!(!EventError::CodeSpaceExhausted { attempts: 5 }.is_client_error());
        assert!(
            !EventError::Repository(RepositoryError::Database("down".into())).is_client_error()
        );
    }
}
