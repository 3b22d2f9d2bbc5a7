//! Payload extractor module
//!
//! Pulls the items array, the total count and per-item identities out of
//! response payloads via configurable paths.
//!
//! # Overview
//!
//! Each extractor owns a normalized [`Path`](crate::path::Path) with a
//! built-in default (`results`, `totalCount`, `id`). Identity reads go
//! through an [`IdentityReader`] so items may be inline objects or
//! normalized cache references.

mod extractors;
mod readers;

pub use extractors::{
    ItemIdExtractor, ItemsExtractor, TotalCountExtractor, DEFAULT_ITEMS_PATH, DEFAULT_ITEM_ID_PATH,
    DEFAULT_TOTAL_COUNT_PATH,
};
pub use readers::{IdentityReader, InlineReader, ReferenceReader, REFERENCE_KEY};

#[cfg(test)]
mod tests;
