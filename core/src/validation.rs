//! Input validation for event creation.
//!
//! A [`CreateEventRequest`] is the raw, loosely typed body a client submits.
//! [`CreateEventRequest::validate`] checks every field, collects all failures
//! instead of stopping at the first one, and produces a [`ValidatedEvent`]
//! whose fields are ready to store.

use crate::service::EventPolicy;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Minimum number of characters in an event title.
pub const MIN_TITLE_CHARS: usize = 3;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Raw create-event body.
///
/// Every field is optional at this stage so that missing values are reported
/// as field errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEventRequest {
    /// Event title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Location text.
    pub location: Option<String>,
    /// Start timestamp as submitted.
    pub start_date: Option<String>,
    /// End timestamp as submitted; empty means absent.
    pub end_date: Option<String>,
    /// Capacity as submitted; kept untyped so non-integers become field errors.
    pub capacity: Option<Value>,
    /// Whether the event is public.
    pub is_public: Option<bool>,
}

impl CreateEventRequest {
    /// Request with the two required fields set.
    #[must_use]
    pub fn new(title: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            start_date: Some(start_date.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the end date.
    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Set the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(Value::from(capacity));
        self
    }

    /// Set the public flag.
    #[must_use]
    pub const fn public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Check every field and return the normalized values.
    ///
    /// `now` is only consulted when `policy.require_future_start` is set.
    ///
    /// # Errors
    ///
    /// Returns all field failures found, in field order.
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        policy: &EventPolicy,
    ) -> Result<ValidatedEvent, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = match self.title.as_deref() {
            Some(title) if title.chars().count() >= MIN_TITLE_CHARS => Some(title.to_string()),
            Some(_) => {
                errors.push(
                    "title",
                    format!("Title must be at least {MIN_TITLE_CHARS} characters long"),
                );
                None
            }
            None => {
                errors.push("title", "Title is required");
                None
            }
        };

        let start_date = match non_empty(self.start_date.as_deref()) {
            Some(raw) => match parse_timestamp(raw) {
                Some(start) if policy.require_future_start && start <= now => {
                    errors.push("startDate", "Start date must be in the future");
                    None
                }
                Some(start) => Some(start),
                None => {
                    errors.push("startDate", "Start date must be a valid date");
                    None
                }
            },
            None => {
                errors.push("startDate", "Start date is required");
                None
            }
        };

        let end_date = match non_empty(self.end_date.as_deref()) {
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    errors.push("endDate", "End date must be a valid date");
                }
                parsed
            }
            None => None,
        };

        let capacity = match &self.capacity {
            None => None,
            Some(value) => {
                let parsed = parse_capacity(value);
                if parsed.is_none() {
                    errors.push("capacity", "Capacity must be a positive integer");
                }
                parsed
            }
        };

        match (title, start_date) {
            (Some(title), Some(start_date)) if errors.is_empty() => Ok(ValidatedEvent {
                title,
                description: non_empty(self.description.as_deref()).map(str::to_string),
                location: non_empty(self.location.as_deref()).map(str::to_string),
                start_date,
                end_date,
                capacity,
                is_public: self.is_public.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}

/// Create-event fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    /// Title.
    pub title: String,
    /// Description; `None` when absent or empty.
    pub description: Option<String>,
    /// Location; `None` when absent or empty.
    pub location: Option<String>,
    /// Start of the event.
    pub start_date: DateTime<Utc>,
    /// End of the event.
    pub end_date: Option<DateTime<Utc>>,
    /// Capacity; `None` means unlimited.
    pub capacity: Option<i32>,
    /// Public flag.
    pub is_public: bool,
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// JSON name of the offending field.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

/// All field failures of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Record a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// A single failure not attached to a specific field.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push("body", message);
        errors
    }

    /// Returns `true` if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the failure for `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an RFC 3339 timestamp, a naive timestamp (read as UTC), or a date
/// (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Positive `i32` from a JSON number. Integral floats such as `25.0` count.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)] // Float range is checked before the cast
fn parse_capacity(value: &Value) -> Option<i32> {
    let capacity = match value.as_i64() {
        Some(integer) => integer,
        None => {
            let float = value.as_f64().filter(|f| f.fract() == 0.0)?;
            if float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
                return None;
            }
            float as i64
        }
    };
    i32::try_from(capacity).ok().filter(|capacity| *capacity > 0)
}
