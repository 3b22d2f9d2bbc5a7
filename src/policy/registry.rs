//! Cache policy registry
//!
//! Wires identity rules and merge-enabled field policies together.

use super::config::QueryPolicyConfig;
use super::key_args::KeyArgs;
use super::normalize::{normalize, KeyFields, StrictQueryPolicy};
use crate::error::{Error, Result};
use crate::merge::{create_merger, MergeContext, Merger};
use crate::pagination::PaginationDescriptor;
use crate::types::MergeMode;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Typename under which query field policies are registered
pub const QUERY_TYPENAME: &str = "Query";

// ============================================================================
// Field Policy
// ============================================================================

/// Key derivation plus merge function for one query field
#[derive(Debug, Clone)]
pub struct FieldPolicy {
    field: String,
    key_args: KeyArgs,
    pagination: Option<PaginationDescriptor>,
    merger: Arc<dyn Merger>,
}

impl FieldPolicy {
    /// Compile a field policy from a strict query policy
    pub fn from_policy(policy: &StrictQueryPolicy) -> Self {
        Self {
            field: policy.field.clone(),
            key_args: policy.key_args.clone(),
            pagination: policy.pagination.clone(),
            merger: create_merger(policy),
        }
    }

    /// Query field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Cache key arguments
    pub fn key_args(&self) -> &KeyArgs {
        &self.key_args
    }

    /// Pagination descriptor, if one is configured
    pub fn pagination(&self) -> Option<&PaginationDescriptor> {
        self.pagination.as_ref()
    }

    /// Payload shape handled by the merge function
    pub fn merge_mode(&self) -> MergeMode {
        self.merger.mode()
    }

    /// Merge function entry point for the host cache store
    pub fn merge(
        &self,
        existing: Option<&Value>,
        incoming: Option<&Value>,
        ctx: &MergeContext<'_>,
    ) -> Value {
        self.merger.merge(existing, incoming, ctx)
    }

    /// Storage key of the cache entry a request with `variables` lands in.
    ///
    /// Requests differing only in variables outside the key args (offset,
    /// page) share one entry.
    pub fn storage_key(&self, variables: &Value) -> String {
        if self.key_args.is_empty() {
            return self.field.clone();
        }
        let projected = Value::Object(self.key_args.project(variables));
        format!("{}({projected})", self.field)
    }

    /// Host-facing policy document for this field
    pub fn to_json(&self) -> Value {
        json!({
            "keyArgs": self.key_args.to_json(),
            "mergeMode": self.merge_mode(),
            "pagination": self.pagination,
        })
    }
}

// ============================================================================
// Type Policy
// ============================================================================

/// Identity rule registered for an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePolicy {
    /// Identity rule
    pub key_fields: KeyFields,
    /// Query field whose registration supplied the rule
    pub registered_by: String,
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Non-fatal anomaly found while building the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A later registration tried to change a typename's identity rule
    IdentityConflict {
        /// Entity typename
        typename: String,
        /// Rule that stays registered
        kept: KeyFields,
        /// Field that registered the kept rule
        kept_from: String,
        /// Rule that was ignored
        rejected: KeyFields,
        /// Field whose rule was ignored
        rejected_from: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentityConflict {
                typename,
                kept,
                kept_from,
                rejected,
                rejected_from,
            } => write!(
                f,
                "identity rule conflict for type '{typename}': keeping {} from '{kept_from}', \
                 ignoring {} from '{rejected_from}'",
                key_fields_label(kept),
                key_fields_label(rejected),
            ),
        }
    }
}

fn key_fields_label(key_fields: &KeyFields) -> String {
    match key_fields {
        KeyFields::Fields(fields) => format!("[{}]", fields.join(", ")),
        KeyFields::Disabled => "false".to_string(),
    }
}

// ============================================================================
// Cache Policies
// ============================================================================

/// Registered type policies and query field policies
#[derive(Debug, Clone, Default)]
pub struct CachePolicies {
    types: BTreeMap<String, TypePolicy>,
    query_fields: BTreeMap<String, FieldPolicy>,
}

impl CachePolicies {
    /// Type policy for `typename`
    pub fn type_policy(&self, typename: &str) -> Option<&TypePolicy> {
        self.types.get(typename)
    }

    /// Field policy for a query field
    pub fn field(&self, field: &str) -> Option<&FieldPolicy> {
        self.query_fields.get(field)
    }

    /// Field policy for a query field, or `FieldNotFound`
    pub fn require_field(&self, field: &str) -> Result<&FieldPolicy> {
        self.field(field).ok_or_else(|| Error::field_not_found(field))
    }

    /// Registered typenames with their policies
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypePolicy)> {
        self.types.iter().map(|(name, policy)| (name.as_str(), policy))
    }

    /// Registered query fields with their policies
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPolicy)> {
        self.query_fields
            .iter()
            .map(|(name, policy)| (name.as_str(), policy))
    }

    /// Merge a response for `field` through its registered merge function
    pub fn merge_field(
        &self,
        field: &str,
        existing: Option<&Value>,
        incoming: Option<&Value>,
        ctx: &MergeContext<'_>,
    ) -> Result<Value> {
        Ok(self.require_field(field)?.merge(existing, incoming, ctx))
    }

    /// Host-facing type policy document:
    /// `{ "<Typename>": {"keyFields": ...}, "Query": {"fields": {...}} }`
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for (typename, policy) in &self.types {
            root.insert(typename.clone(), json!({ "keyFields": policy.key_fields }));
        }

        let fields: Map<String, Value> = self
            .query_fields
            .iter()
            .map(|(name, policy)| (name.clone(), policy.to_json()))
            .collect();
        let query = root
            .entry(QUERY_TYPENAME.to_string())
            .or_insert_with(|| json!({}));
        if let Value::Object(query) = query {
            query.insert("fields".to_string(), Value::Object(fields));
        }
        Value::Object(root)
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Build the registry from strict policies, in registration order.
///
/// The first identity rule registered for a typename wins; each later
/// registration with a different rule yields one [`Diagnostic`]. A query
/// field registered twice is a configuration error.
pub fn build_registry(policies: &[StrictQueryPolicy]) -> Result<(CachePolicies, Vec<Diagnostic>)> {
    let mut registry = CachePolicies::default();
    let mut diagnostics = Vec::new();

    for policy in policies {
        if registry.query_fields.contains_key(&policy.field) {
            return Err(Error::duplicate_field(&policy.field));
        }
        registry
            .query_fields
            .insert(policy.field.clone(), FieldPolicy::from_policy(policy));

        let Some(typename) = &policy.entity_typename else {
            continue;
        };
        match registry.types.get(typename) {
            Some(existing) if existing.key_fields != policy.identity => {
                diagnostics.push(Diagnostic::IdentityConflict {
                    typename: typename.clone(),
                    kept: existing.key_fields.clone(),
                    kept_from: existing.registered_by.clone(),
                    rejected: policy.identity.clone(),
                    rejected_from: policy.field.clone(),
                });
            }
            Some(_) => {}
            None => {
                registry.types.insert(
                    typename.clone(),
                    TypePolicy {
                        key_fields: policy.identity.clone(),
                        registered_by: policy.field.clone(),
                    },
                );
            }
        }
    }

    Ok((registry, diagnostics))
}

/// Normalize raw configs and build the registry, logging diagnostics
pub fn build_cache_policies(configs: &[QueryPolicyConfig]) -> Result<CachePolicies> {
    let policies = configs.iter().map(normalize).collect::<Result<Vec<_>>>()?;
    let (registry, diagnostics) = build_registry(&policies)?;

    for diagnostic in &diagnostics {
        warn!(%diagnostic, "Cache policy diagnostic");
    }
    info!(
        fields = registry.query_fields.len(),
        types = registry.types.len(),
        "Built cache policies"
    );
    Ok(registry)
}
