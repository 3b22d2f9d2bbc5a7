//! Cache policy module
//!
//! Turns declarative per-query-field configuration into the identity rules
//! and merge-enabled field policies the host cache store registers.
//!
//! # Overview
//!
//! - [`QueryPolicyConfig`] - raw, user-facing configuration (YAML/JSON)
//! - [`normalize`] - fail-fast validation into a [`StrictQueryPolicy`]
//! - [`build_registry`] - pure reducer producing [`CachePolicies`] plus
//!   [`Diagnostic`]s for identity-rule conflicts
//! - [`build_cache_policies`] - normalize + build, logging diagnostics

mod config;
mod key_args;
mod normalize;
mod registry;

pub use config::{IdentityFieldsDef, PaginationVariablePaths, PolicyFile, QueryPolicyConfig};
pub use key_args::{KeyArg, KeyArgs, KeySelection};
pub use normalize::{normalize, KeyFields, StrictQueryPolicy};
pub use registry::{
    build_cache_policies, build_registry, CachePolicies, Diagnostic, FieldPolicy, TypePolicy,
};
