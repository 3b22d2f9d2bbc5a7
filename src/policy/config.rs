//! Query policy configuration
//!
//! Raw configuration structures as written in policy files. Paths may be
//! strings or lists; nothing here is validated until [`normalize`] runs.
//!
//! [`normalize`]: super::normalize

use crate::pagination::PaginationMode;
use crate::path::PathLike;
use crate::types::MergeMode;
use serde::{Deserialize, Serialize};

/// A policy file: a list of query field configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyFile {
    /// File format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Query field policies, in registration order
    #[serde(default)]
    pub queries: Vec<QueryPolicyConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Per-query-field policy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryPolicyConfig {
    /// Query field name (e.g. `things`)
    pub field: String,

    /// Typename of the listed entities, if they should be normalized
    #[serde(default)]
    pub entity_typename: Option<String>,

    /// Identity rule for `entity_typename`: a field list or `false`
    #[serde(default)]
    pub identity_fields: Option<IdentityFieldsDef>,

    /// Variables that distinguish cache entries (`filter`, `pagination.perPage`)
    #[serde(default)]
    pub cache_key_variables: Vec<String>,

    /// Location of the items array (default `results`)
    #[serde(default)]
    pub items_path: Option<PathLike>,

    /// Location of the total count (default `totalCount`)
    #[serde(default)]
    pub total_count_path: Option<PathLike>,

    /// Location of each item's identity (default `id`)
    #[serde(default)]
    pub item_id_path: Option<PathLike>,

    /// Pagination vocabulary
    #[serde(default)]
    pub pagination_mode: PaginationMode,

    /// Overrides for where pagination variables live
    #[serde(default)]
    pub pagination_variable_paths: PaginationVariablePaths,

    /// Payload shape
    #[serde(default)]
    pub merge_mode: MergeMode,
}

impl QueryPolicyConfig {
    /// Create a config for `field` with every option at its default
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }
}

/// Identity rule as written in config: `[id, ...]`, or `false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentityFieldsDef {
    /// `false` disables normalization (`true` is rejected)
    Flag(bool),
    /// Explicit identity fields
    Fields(Vec<String>),
}

/// Explicit pagination variable locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationVariablePaths {
    /// Offset variable (offset mode)
    #[serde(default)]
    pub offset: Option<PathLike>,
    /// Limit variable (offset mode)
    #[serde(default)]
    pub limit: Option<PathLike>,
    /// Page variable (per-page mode)
    #[serde(default)]
    pub page: Option<PathLike>,
    /// Page-size variable (per-page mode)
    #[serde(default, alias = "perPage")]
    pub per_page: Option<PathLike>,
}

impl PaginationVariablePaths {
    pub(crate) fn has_offset_paths(&self) -> bool {
        self.offset.is_some() || self.limit.is_some()
    }

    pub(crate) fn has_per_page_paths(&self) -> bool {
        self.page.is_some() || self.per_page.is_some()
    }
}
