//! Merge module
//!
//! Supports: flat-array merge, wrapped-object merge
//!
//! # Overview
//!
//! A merger is the function the host cache store calls once per incoming
//! response with the previously cached value, the new value and the
//! request context. It returns the value to cache. Mergers never fail and
//! never mutate their inputs; every call builds a fresh value.
//!
//! Cached items arrays are sparse and addressed by absolute position in
//! the remote list. Unfetched positions hold a hole (`null`).

mod strategies;
mod types;

pub use strategies::{create_merger, ArrayMerger, WrappedMerger, MAX_SPARSE_INDEX};
pub use types::{MergeContext, Merger};
