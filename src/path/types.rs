//! Path types
//!
//! Defines the normalized `Path` and the raw `PathLike` config input.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Regex for splitting dotted paths: `a.b[0].c` -> `a`, `b`, `0`, `c`
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.\[\]]+").unwrap());

/// Raw path as written in configuration: a dotted string or a segment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathLike {
    /// Dot-delimited path, e.g. `"pagination.offset"`
    Dotted(String),
    /// Explicit segments, e.g. `["pagination", "offset"]`
    Segments(Vec<String>),
}

impl From<&str> for PathLike {
    fn from(value: &str) -> Self {
        Self::Dotted(value.to_string())
    }
}

impl From<String> for PathLike {
    fn from(value: String) -> Self {
        Self::Dotted(value)
    }
}

impl From<Vec<String>> for PathLike {
    fn from(value: Vec<String>) -> Self {
        Self::Segments(value)
    }
}

impl From<&[&str]> for PathLike {
    fn from(value: &[&str]) -> Self {
        Self::Segments(value.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Normalized path: an ordered sequence of segments.
///
/// A numeric segment addresses an array index when the container at that
/// point is an array, and an object key otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// Create a path from segments
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dotted path.
    ///
    /// A leading `$` root marker is ignored and bracket indices become
    /// their own segments. Empty input yields an empty (invalid) path.
    pub fn from_dotted(path: &str) -> Self {
        let path = path.strip_prefix('$').unwrap_or(path);
        Self(
            SEGMENT_REGEX
                .find_iter(path)
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }

    /// Normalize a string-or-list path. May return an empty path.
    pub fn from_like(like: &PathLike) -> Self {
        match like {
            PathLike::Dotted(s) => Self::from_dotted(s),
            PathLike::Segments(segments) => Self(segments.clone()),
        }
    }

    /// Normalize a path that must not be empty.
    ///
    /// `field` names the config entry in the error message.
    pub fn require(field: &str, like: &PathLike) -> Result<Self> {
        let path = Self::from_like(like);
        if path.is_empty() {
            return Err(Error::invalid_path(field, "path cannot be empty"));
        }
        Ok(path)
    }

    /// Segments of this path
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return a new path with `segment` appended
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Parse a segment as an array index (ASCII digits only)
pub(crate) fn segment_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
