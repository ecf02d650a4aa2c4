//! Domain types for events, attendances, and the users that own them.
//!
//! All wire-facing types serialize with camelCase field names.

use crate::code::EventCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Borrow the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a user account.
    UserId
);
uuid_id!(
    /// Identifier of an event. Never changes after creation.
    EventId
);
uuid_id!(
    /// Identifier of an attendance record.
    AttendanceId
);

/// Minimal view of a user as seen by the event module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User ID.
    pub id: UserId,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: Option<String>,
}

/// Creator summary embedded in the public event projection.
pub type CreatorSummary = UserSummary;

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event ID.
    pub id: EventId,
    /// Title (at least three characters).
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Start of the event.
    pub start_date: DateTime<Utc>,
    /// End of the event.
    pub end_date: Option<DateTime<Utc>>,
    /// Maximum number of attendees; `None` means unlimited.
    pub capacity: Option<i32>,
    /// Whether the event is listed publicly.
    pub is_public: bool,
    /// Shareable join code.
    pub code: EventCode,
    /// Owning user.
    pub creator_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns `true` if `attendees` already fills the event.
    #[must_use]
    pub fn is_full(&self, attendees: i64) -> bool {
        self.capacity
            .is_some_and(|capacity| attendees >= i64::from(capacity))
    }
}

/// An event ready to be inserted. Produced by validation plus code assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Pre-assigned event ID.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start of the event.
    pub start_date: DateTime<Utc>,
    /// End of the event.
    pub end_date: Option<DateTime<Utc>>,
    /// Capacity.
    pub capacity: Option<i32>,
    /// Public flag.
    pub is_public: bool,
    /// Assigned join code.
    pub code: EventCode,
    /// Owning user.
    pub creator_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    /// Materialize the stored form of this event.
    #[must_use]
    pub fn into_event(self) -> Event {
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            capacity: self.capacity,
            is_public: self.is_public,
            code: self.code,
            creator_id: self.creator_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Attendance counters embedded in the public projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCount {
    /// Number of attendance records for the event.
    pub attendances: i64,
}

/// Public projection of an event, returned by code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Event ID.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start of the event.
    pub start_date: DateTime<Utc>,
    /// End of the event.
    pub end_date: Option<DateTime<Utc>>,
    /// Public flag.
    pub is_public: bool,
    /// Join code.
    pub code: EventCode,
    /// Capacity.
    pub capacity: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Who created the event.
    pub creator: CreatorSummary,
    /// Attendance counters.
    #[serde(rename = "_count")]
    pub count: AttendanceCount,
}

/// Status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// The user has a place at the event.
    Confirmed,
}

impl AttendanceStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join record linking one user to one event.
///
/// At most one attendance exists per `(event_id, user_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    /// Attendance ID.
    pub id: AttendanceId,
    /// Event joined.
    pub event_id: EventId,
    /// Joining user.
    pub user_id: UserId,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// A fresh confirmed attendance for the pair.
    #[must_use]
    pub fn confirmed(event_id: EventId, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: AttendanceId::new(),
            event_id,
            user_id,
            status: AttendanceStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event(capacity: Option<i32>) -> Event {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        NewEvent {
            id: EventId::new(),
            title: "Launch".to_string(),
            description: None,
            location: None,
            start_date: now,
            end_date: None,
            capacity,
            is_public: false,
            code: "ABC234".parse().unwrap(),
            creator_id: UserId::new(),
            created_at: now,
        }
        .into_event()
    }

    #[test]
    fn test_is_full_respects_capacity() {
        let unlimited = sample_event(None);
        assert!(!unlimited.is_full(10_000));

        let small = sample_event(Some(2));
        assert!(!small.is_full(1));
        assert!(small.is_full(2));
        assert!(small.is_full(3));
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let json = serde_json::to_value(sample_event(None)).unwrap();
        assert_eq!(json["title"], "Launch");
        assert_eq!(json["isPublic"], false);
        assert!(json["capacity"].is_null());
        assert!(json.get("startDate").is_some());
        assert!(json.get("creatorId").is_some());
    }

    #[test]
    fn test_attendance_status_round_trips_through_storage_form() {
        let status: AttendanceStatus = "confirmed".parse().unwrap();
        assert_eq!(status, AttendanceStatus::Confirmed);
        assert_eq!(status.as_str(), "confirmed");
        assert!("cancelled".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_details_expose_count_under_underscore_key() {
        let event = sample_event(Some(5));
        let details = EventDetails {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            start_date: event.start_date,
            end_date: event.end_date,
            is_public: event.is_public,
            code: event.code,
            capacity: event.capacity,
            created_at: event.created_at,
            creator: UserSummary {
                id: event.creator_id,
                email: "host@example.com".to_string(),
                name: None,
            },
            count: AttendanceCount { attendances: 3 },
        };
        let json = serde_json::to_value(details).unwrap();
        assert_eq!(json["_count"]["attendances"], 3);
        assert_eq!(json["creator"]["email"], "host@example.com");
    }
}
