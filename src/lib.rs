// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Merge
//!
//! A paginated result cache merge engine. Given paged responses arriving in
//! any order, it maintains one consistent, sparse, identity-deduplicated
//! list per query field in a client-side normalized cache.
//!
//! ## Features
//!
//! - **Two pagination vocabularies**: offset/limit and page/perPage, plus auto-detection
//! - **Sparse list cache**: items addressed by absolute position; unfetched slots are holes
//! - **Identity dedup**: an item that moves to a new position leaves a hole behind
//! - **Metadata carry-forward**: total count survives pages that omit it; page info is latest-wins
//! - **Declarative policies**: YAML policy files compiled into type and field policies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_merge::{load_cache_policies, MergeContext, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let policies = load_cache_policies("policies.yaml")?;
//!     let things = policies.require_field("things")?;
//!
//!     let vars = json!({ "pagination": { "offset": 0, "limit": 3 } });
//!     let page = json!({ "results": [{ "id": 1 }, { "id": 2 }, { "id": 3 }], "totalCount": 9 });
//!     let cached = things.merge(None, Some(&page), &MergeContext::new(&vars));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │       Host cache store: merge(existing, incoming, ctx)       │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────┬──────────────┬─────────┐
//! │   Policy     │   Merge             │  Pagination  │ Extract │
//! ├──────────────┼─────────────────────┼──────────────┼─────────┤
//! │ Normalizer   │ Wrapped (dedup)     │ Offset       │ Items   │
//! │ Key args     │ Array (positional)  │ PerPage      │ Total   │
//! │ Registry     │                     │ Auto-detect  │ Id      │
//! └──────────────┴─────────────────────┴──────────────┴─────────┘
//!                               │
//!                       Path accessor
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Nested path access
pub mod path;

/// Pagination descriptors and window resolution
pub mod pagination;

/// Items, total count and identity extractors
pub mod extract;

/// Merge strategies
pub mod merge;

/// Cache policy normalization and registry
pub mod policy;

/// YAML loader for policy files
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use loader::{load_cache_policies, load_policies, load_policies_from_str};
pub use merge::{MergeContext, Merger};
pub use pagination::{MergeWindow, PaginationDescriptor};
pub use policy::{build_cache_policies, CachePolicies, FieldPolicy, QueryPolicyConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
