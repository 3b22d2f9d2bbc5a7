//! Items, total-count and identity extractors

use super::readers::IdentityReader;
use crate::path::{self, Path};
use crate::types::ItemIdentity;
use serde_json::{Number, Value};

/// Default items path
pub const DEFAULT_ITEMS_PATH: &str = "results";

/// Default total-count path
pub const DEFAULT_TOTAL_COUNT_PATH: &str = "totalCount";

/// Default item identity path
pub const DEFAULT_ITEM_ID_PATH: &str = "id";

// ============================================================================
// Items
// ============================================================================

/// Reads the items array out of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsExtractor {
    path: Path,
}

impl Default for ItemsExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ItemsExtractor {
    /// Create an extractor, defaulting to `results`
    pub fn new(path: Option<Path>) -> Self {
        Self {
            path: path.unwrap_or_else(|| Path::new([DEFAULT_ITEMS_PATH])),
        }
    }

    /// Configured path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Items array, or `None` when the path does not lead to an array.
    ///
    /// An empty array is returned as `Some`, so callers can tell "absent"
    /// from "empty".
    pub fn get_items<'a>(&self, payload: Option<&'a Value>) -> Option<&'a Vec<Value>> {
        path::read(payload?, &self.path)?.as_array()
    }
}

// ============================================================================
// Total Count
// ============================================================================

/// Reads the total count out of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalCountExtractor {
    path: Path,
}

impl Default for TotalCountExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TotalCountExtractor {
    /// Create an extractor, defaulting to `totalCount`
    pub fn new(path: Option<Path>) -> Self {
        Self {
            path: path.unwrap_or_else(|| Path::new([DEFAULT_TOTAL_COUNT_PATH])),
        }
    }

    /// Configured path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total count, only if the value at the path is a JSON number
    pub fn get_total_count<'a>(&self, payload: Option<&'a Value>) -> Option<&'a Number> {
        match path::read(payload?, &self.path)? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
}

// ============================================================================
// Item Identity
// ============================================================================

/// Reads an item's identity through an [`IdentityReader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdExtractor {
    path: Path,
}

impl Default for ItemIdExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ItemIdExtractor {
    /// Create an extractor, defaulting to `id`
    pub fn new(path: Option<Path>) -> Self {
        Self {
            path: path.unwrap_or_else(|| Path::new([DEFAULT_ITEM_ID_PATH])),
        }
    }

    /// Configured path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identity of `item`, or `None` if it has no string/number at the path
    pub fn get_item_id(&self, item: &Value, reader: &dyn IdentityReader) -> Option<ItemIdentity> {
        ItemIdentity::from_value(&reader.read_field(item, &self.path)?)
    }
}
