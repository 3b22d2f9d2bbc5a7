//! Common types used throughout Solidafy Merge
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Holes
// ============================================================================

/// Value stored at a not-yet-fetched position of a cached items array
pub const HOLE: JsonValue = JsonValue::Null;

/// Check if an items slot is a hole
pub fn is_hole(value: &JsonValue) -> bool {
    value.is_null()
}

// ============================================================================
// Item Identity
// ============================================================================

/// Magnitude below which every integral `f64` is exact (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Scalar used to recognize the same logical item across pages.
///
/// Text and numeric identities never compare equal, so `1` and `"1"`
/// are two different items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemIdentity {
    /// String identity
    Text(String),
    /// Numeric identity, kept in its canonical JSON rendering
    Number(String),
}

impl ItemIdentity {
    /// Convert a JSON scalar into an identity.
    ///
    /// Integral floats collapse onto their integer form, so `1.0` and `1`
    /// are the same item. Returns `None` for anything that is not a string
    /// or a number.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
                    Some(Self::Number((f as i64).to_string()))
                }
                _ => Some(Self::Number(n.to_string())),
            },
            _ => None,
        }
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Number(n) => f.write_str(n),
        }
    }
}

// ============================================================================
// Merge Mode
// ============================================================================

/// Shape of the payload a query field returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Response object wrapping an items array plus total/pageInfo siblings
    #[default]
    Wrapped,
    /// Bare array of items
    Array,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapped => f.write_str("wrapped"),
            Self::Array => f.write_str("array"),
        }
    }
}
