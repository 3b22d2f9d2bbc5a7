//! YAML Loader module
//!
//! Parse cache policy files from YAML.
//!
//! # Overview
//!
//! The loader module provides:
//! - `load_policies` / `load_policies_from_str` - parse and validate a `PolicyFile`
//! - `load_cache_policies` - parse, validate and build the registry
//!
//! Every query entry is normalized during validation, so a file that loads
//! cleanly cannot fail later at registry build time.

mod parser;

pub use parser::{load_cache_policies, load_policies, load_policies_from_str};

#[cfg(test)]
mod tests;
