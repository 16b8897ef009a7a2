//! Case-insensitive tag type for labeling notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A case-insensitive tag attached to a note.
///
/// Tags are flat labels used for filtering and search. They are stored
/// lowercase, so `Draft`, `draft`, and `DRAFT` are the same tag.
///
/// # Validation Rules
/// - Non-empty after normalization
/// - Only alphanumeric characters, hyphens, and underscores
///
/// # Examples
///
/// ```
/// use garden::domain::Tag;
///
/// let tag = Tag::new("Draft").unwrap();
/// assert_eq!(tag.as_str(), "draft");
/// assert_eq!(tag, Tag::new("DRAFT").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tag(String); // Always stored lowercase

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag, trimming whitespace and lowercasing.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty after normalization or
    /// contains characters other than alphanumerics, hyphens, and underscores.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ParseTagError(format!(
                "invalid tag '{}': tags must contain only alphanumeric characters, hyphens, and underscores",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized tag value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
