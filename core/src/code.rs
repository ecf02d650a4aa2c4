//! Shareable event codes.
//!
//! An event code is a short identifier that lets people join an event without
//! a direct link. Codes are six characters drawn from a 32-symbol alphabet of
//! uppercase letters and digits with the visually ambiguous `I`, `O`, `0` and
//! `1` removed.
//!
//! Generation draws every character independently and uniformly from the
//! operating system's CSPRNG. No uniqueness check happens here; the store
//! enforces uniqueness and [`EventService`](crate::service::EventService)
//! regenerates on conflict.

use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbols an event code may contain.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in an event code.
pub const CODE_LENGTH: usize = 6;

/// Error returned when a string is not a well-formed event code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid event code: {0}")]
pub struct ParseEventCodeError(String);

/// A six-character event code.
///
/// # Validation
///
/// - [`EventCode::generate`] always produces a well-formed code.
/// - [`FromStr`] accepts exactly six characters from [`CODE_ALPHABET`]
///   (case-sensitive).
/// - [`EventCode::from_trusted`] skips validation and is meant for values read
///   back from storage.
///
/// # Examples
///
/// ```
/// use eventmaker_core::code::{EventCode, CODE_ALPHABET};
///
/// let code = EventCode::generate();
/// assert_eq!(code.as_str().len(), 6);
/// assert!(code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)));
///
/// assert!("ABC234".parse::<EventCode>().is_ok());
/// assert!("abc234".parse::<EventCode>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCode(String);

impl EventCode {
    /// Draw a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a code from the given random source.
    ///
    /// Exposed so tests can drive generation with a seeded generator.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Wrap a code read from trusted storage without validating it.
    #[must_use]
    pub const fn from_trusted(code: String) -> Self {
        Self(code)
    }

    /// Parse a candidate code, returning `None` if it is malformed.
    #[must_use]
    pub fn parse(candidate: &str) -> Option<Self> {
        candidate.parse().ok()
    }

    /// Returns `true` if `candidate` is a well-formed code.
    #[must_use]
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() == CODE_LENGTH && candidate.bytes().all(|b| CODE_ALPHABET.contains(&b))
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for EventCode {
    type Err = ParseEventCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseEventCodeError(s.to_string()))
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
