//! Merge types and traits

use crate::extract::{IdentityReader, InlineReader};
use crate::types::MergeMode;
use serde_json::Value;
use std::fmt;

/// Per-call context supplied by the host cache store
#[derive(Clone, Copy)]
pub struct MergeContext<'a> {
    /// Variables of the request that produced the incoming value
    pub variables: &'a Value,
    /// Field-read indirection for items that may be cache references
    pub reader: &'a dyn IdentityReader,
}

impl<'a> MergeContext<'a> {
    /// Context reading identities from inline items
    pub fn new(variables: &'a Value) -> Self {
        Self {
            variables,
            reader: &InlineReader,
        }
    }

    /// Context with a host-provided identity reader
    pub fn with_reader(variables: &'a Value, reader: &'a dyn IdentityReader) -> Self {
        Self { variables, reader }
    }
}

impl fmt::Debug for MergeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeContext")
            .field("variables", self.variables)
            .finish_non_exhaustive()
    }
}

/// Core trait for merge strategies
pub trait Merger: Send + Sync + fmt::Debug {
    /// Merge `incoming` into `existing` and return the new cached value.
    ///
    /// Absent inputs are treated as empty. The inputs are left untouched.
    fn merge(
        &self,
        existing: Option<&Value>,
        incoming: Option<&Value>,
        ctx: &MergeContext<'_>,
    ) -> Value;

    /// Payload shape this merger handles
    fn mode(&self) -> MergeMode;
}
