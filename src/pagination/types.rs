//! Pagination types
//!
//! Defines the pagination descriptor and the canonical merge window.

use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default offset variable location
pub const DEFAULT_OFFSET_PATH: [&str; 2] = ["pagination", "offset"];

/// Default limit variable location
pub const DEFAULT_LIMIT_PATH: [&str; 2] = ["pagination", "limit"];

/// Default page variable location
pub const DEFAULT_PAGE_PATH: [&str; 2] = ["pagination", "page"];

/// Default page-size variable location
pub const DEFAULT_PER_PAGE_PATH: [&str; 2] = ["pagination", "perPage"];

/// Pagination vocabulary requested by a query policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// `offset` + `limit` variables
    #[default]
    Offset,
    /// `page` + `perPage` variables
    PerPage,
    /// No descriptor; infer the vocabulary from each request's variables
    Auto,
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => f.write_str("offset"),
            Self::PerPage => f.write_str("per_page"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// Where a query field's pagination variables live.
///
/// Immutable once built; answers "which `{offset, limit}` window does this
/// request represent?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationDescriptor {
    /// Offset/limit pagination
    Offset {
        /// Path to the offset variable
        #[serde(rename = "offsetPath")]
        offset_path: Path,
        /// Path to the limit variable
        #[serde(rename = "limitPath")]
        limit_path: Path,
    },
    /// Page/perPage pagination (pages are 1-based)
    PerPage {
        /// Path to the page variable
        #[serde(rename = "pagePath")]
        page_path: Path,
        /// Path to the page-size variable
        #[serde(rename = "perPagePath")]
        per_page_path: Path,
    },
}

impl PaginationDescriptor {
    /// Create an offset descriptor
    pub fn offset(offset_path: Path, limit_path: Path) -> Self {
        Self::Offset {
            offset_path,
            limit_path,
        }
    }

    /// Create a per-page descriptor
    pub fn per_page(page_path: Path, per_page_path: Path) -> Self {
        Self::PerPage {
            page_path,
            per_page_path,
        }
    }

    /// Offset descriptor at `pagination.offset` / `pagination.limit`
    pub fn default_offset() -> Self {
        Self::offset(Path::new(DEFAULT_OFFSET_PATH), Path::new(DEFAULT_LIMIT_PATH))
    }

    /// Per-page descriptor at `pagination.page` / `pagination.perPage`
    pub fn default_per_page() -> Self {
        Self::per_page(Path::new(DEFAULT_PAGE_PATH), Path::new(DEFAULT_PER_PAGE_PATH))
    }

    /// The mode this descriptor implements
    pub fn mode(&self) -> PaginationMode {
        match self {
            Self::Offset { .. } => PaginationMode::Offset,
            Self::PerPage { .. } => PaginationMode::PerPage,
        }
    }
}

/// Position of an incoming page within the logical full list.
///
/// `limit` is informational: a page at the end of the list may carry
/// fewer than `limit` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergeWindow {
    /// Absolute index of the page's first item
    pub offset: usize,
    /// Requested page size
    pub limit: usize,
}

impl MergeWindow {
    /// Create a window
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The no-op window `{0, 0}`
    pub fn empty() -> Self {
        Self::default()
    }
}
