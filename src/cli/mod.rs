//! CLI module
//!
//! Command-line interface for inspecting policy files and replaying merges.
//!
//! # Commands
//!
//! - `validate` - Load a policy file, build the registry, report diagnostics
//! - `window` - Resolve the merge window for a set of request variables
//! - `merge` - Replay a sequence of responses through a field's merge function

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{PageRecord, Runner};
