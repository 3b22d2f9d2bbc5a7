//! Pagination module
//!
//! Supports: Offset/Limit, Page/PerPage, and auto-detection
//!
//! # Overview
//!
//! Both pagination vocabularies collapse into one canonical
//! [`MergeWindow`]: the absolute offset of the first item of a page in the
//! logical full list, plus the requested page size. Merge strategies only
//! ever see the window; they never know which vocabulary the request used.

mod resolver;
mod types;

pub use resolver::{coerce_non_negative, detect_descriptor, resolve_window};
pub use types::{
    MergeWindow, PaginationDescriptor, PaginationMode, DEFAULT_LIMIT_PATH, DEFAULT_OFFSET_PATH,
    DEFAULT_PAGE_PATH, DEFAULT_PER_PAGE_PATH,
};
