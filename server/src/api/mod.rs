//! JSON API handlers mounted under `/api`.

pub mod attendance;
pub mod events;
pub mod system;

use eventmaker_core::{EventError, EventId};

/// Parse a path id, treating a malformed value as the missing record `missing`.
pub(crate) fn parse_event_id(raw: &str, missing: EventError) -> Result<EventId, EventError> {
    raw.parse().map_err(|_| {
        tracing::debug!(id = raw, "Malformed event id");
        missing
    })
}
