//! Identity readers
//!
//! The host cache may hand the merge function normalized references
//! (`{"__ref": "Thing:1"}`) instead of inline objects. Readers hide that
//! difference from the merge algorithm.

use crate::path::{self, Path};
use crate::types::JsonObject;
use serde_json::Value;

/// Key marking a normalized cache reference
pub const REFERENCE_KEY: &str = "__ref";

/// Reads a field from an item on behalf of the merge algorithm
pub trait IdentityReader: Send + Sync {
    /// Read the value at `path` from `item`, or `None` if absent
    fn read_field(&self, item: &Value, path: &Path) -> Option<Value>;
}

/// Reads fields directly from inline items
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineReader;

impl IdentityReader for InlineReader {
    fn read_field(&self, item: &Value, path: &Path) -> Option<Value> {
        path::read(item, path).cloned()
    }
}

/// Resolves `{"__ref": id}` items against a map of normalized entities.
///
/// Items that are not references are read inline. A dangling reference
/// reads as absent.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceReader<'a> {
    entities: &'a JsonObject,
}

impl<'a> ReferenceReader<'a> {
    /// Create a reader over the host's normalized entities
    pub fn new(entities: &'a JsonObject) -> Self {
        Self { entities }
    }

    fn resolve<'v>(&'v self, item: &'v Value) -> Option<&'v Value> {
        match item.get(REFERENCE_KEY) {
            Some(Value::String(id)) => self.entities.get(id),
            _ => Some(item),
        }
    }
}

impl IdentityReader for ReferenceReader<'_> {
    fn read_field(&self, item: &Value, path: &Path) -> Option<Value> {
        path::read(self.resolve(item)?, path).cloned()
    }
}
