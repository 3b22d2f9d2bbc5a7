//! Path accessor module
//!
//! Generic read/write access to nested JSON graphs.
//!
//! # Overview
//!
//! Configuration supplies paths either as dot-delimited strings
//! (`"data.items"`, `"$.data.items[0]"`) or as explicit segment lists
//! (`["data", "items"]`). Both forms normalize into a [`Path`] once, at
//! configuration time; merge code only ever sees the normalized type.

mod accessor;
mod types;

pub use accessor::{read, write};
pub use types::{Path, PathLike};

#[cfg(test)]
mod tests;
