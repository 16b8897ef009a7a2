//! UUID-based note identifier with prefix extraction and serde support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for notes.
///
/// Identifiers are UUIDs in hyphenated lowercase form, matching the ids the
/// note store assigns on creation. They are opaque: nothing should be read
/// into their structure beyond uniqueness.
///
/// # Examples
///
/// ```
/// use garden::domain::NoteId;
///
/// let id = NoteId::new();
/// println!("Full ID: {}", id);         // e.g., "67e55044-10b1-426f-9247-bb680e5fe0c8"
/// println!("Prefix: {}", id.prefix()); // e.g., "67e55044"
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Creates a new random NoteId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the 8-character prefix of the identifier.
    ///
    /// Used in listings where the full 36-character form is too noisy.
    pub fn prefix(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid identifier string.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(NoteId).map_err(|e| ParseNoteIdError {
            value: s.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
