//! Query policy normalizer
//!
//! Validates raw [`QueryPolicyConfig`]s into strict descriptors. Every
//! configuration problem surfaces here, before any response is merged.

use super::config::{IdentityFieldsDef, PaginationVariablePaths, QueryPolicyConfig};
use super::key_args::KeyArgs;
use crate::error::{Error, Result};
use crate::extract::{DEFAULT_ITEMS_PATH, DEFAULT_ITEM_ID_PATH, DEFAULT_TOTAL_COUNT_PATH};
use crate::pagination::{
    PaginationDescriptor, PaginationMode, DEFAULT_LIMIT_PATH, DEFAULT_OFFSET_PATH,
    DEFAULT_PAGE_PATH, DEFAULT_PER_PAGE_PATH,
};
use crate::path::{Path, PathLike};
use crate::types::MergeMode;
use serde::{Serialize, Serializer};

/// Identity rule for an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFields {
    /// Normalize by these fields
    Fields(Vec<String>),
    /// Do not normalize instances of this type
    Disabled,
}

impl KeyFields {
    /// The `["id"]` rule used when none is configured
    pub fn default_id() -> Self {
        Self::Fields(vec![DEFAULT_ITEM_ID_PATH.to_string()])
    }
}

impl Serialize for KeyFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Fields(fields) => fields.serialize(serializer),
            Self::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Validated, fully-defaulted query policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictQueryPolicy {
    /// Query field name
    pub field: String,
    /// Entity typename, if instances are normalized under a type policy
    pub entity_typename: Option<String>,
    /// Resolved identity rule
    pub identity: KeyFields,
    /// Compiled cache key arguments
    pub key_args: KeyArgs,
    /// Items array location
    pub items_path: Path,
    /// Total count location
    pub total_count_path: Path,
    /// Item identity location
    pub item_id_path: Path,
    /// Pagination descriptor; `None` means auto-detect per request
    pub pagination: Option<PaginationDescriptor>,
    /// Payload shape
    pub merge_mode: MergeMode,
}

/// Normalize a raw query policy
pub fn normalize(config: &QueryPolicyConfig) -> Result<StrictQueryPolicy> {
    if config.field.trim().is_empty() {
        return Err(Error::config("Query field name cannot be empty"));
    }
    let context = |name: &str| format!("{}.{name}", config.field);

    let entity_typename = match &config.entity_typename {
        Some(name) if name.trim().is_empty() => {
            return Err(Error::invalid_value(
                context("entity_typename"),
                "typename cannot be empty",
            ));
        }
        other => other.clone(),
    };

    Ok(StrictQueryPolicy {
        field: config.field.clone(),
        entity_typename,
        identity: resolve_identity(config.identity_fields.as_ref(), &context("identity_fields"))?,
        key_args: KeyArgs::parse(config.cache_key_variables.as_slice())?,
        items_path: path_or_default(
            config.items_path.as_ref(),
            DEFAULT_ITEMS_PATH,
            &context("items_path"),
        )?,
        total_count_path: path_or_default(
            config.total_count_path.as_ref(),
            DEFAULT_TOTAL_COUNT_PATH,
            &context("total_count_path"),
        )?,
        item_id_path: path_or_default(
            config.item_id_path.as_ref(),
            DEFAULT_ITEM_ID_PATH,
            &context("item_id_path"),
        )?,
        pagination: resolve_descriptor(
            config.pagination_mode,
            &config.pagination_variable_paths,
            &context("pagination_variable_paths"),
        )?,
        merge_mode: config.merge_mode,
    })
}

fn path_or_default(like: Option<&PathLike>, default: &str, field: &str) -> Result<Path> {
    match like {
        Some(like) => Path::require(field, like),
        None => Ok(Path::from_dotted(default)),
    }
}

fn resolve_identity(def: Option<&IdentityFieldsDef>, field: &str) -> Result<KeyFields> {
    match def {
        None => Ok(KeyFields::default_id()),
        Some(IdentityFieldsDef::Flag(false)) => Ok(KeyFields::Disabled),
        Some(IdentityFieldsDef::Flag(true)) => Err(Error::invalid_value(
            field,
            "expected a list of fields or `false`",
        )),
        Some(IdentityFieldsDef::Fields(fields)) => {
            if fields.iter().any(|f| f.trim().is_empty()) {
                return Err(Error::invalid_value(field, "identity field names cannot be empty"));
            }
            Ok(KeyFields::Fields(fields.clone()))
        }
    }
}

/// Build the descriptor for `mode`, applying only that mode's overrides
fn resolve_descriptor(
    mode: PaginationMode,
    paths: &PaginationVariablePaths,
    field: &str,
) -> Result<Option<PaginationDescriptor>> {
    match mode {
        PaginationMode::Offset => {
            if paths.has_per_page_paths() {
                return Err(Error::invalid_value(
                    field,
                    "page/per_page paths given for offset pagination",
                ));
            }
            Ok(Some(PaginationDescriptor::offset(
                override_or(paths.offset.as_ref(), &DEFAULT_OFFSET_PATH, field)?,
                override_or(paths.limit.as_ref(), &DEFAULT_LIMIT_PATH, field)?,
            )))
        }
        PaginationMode::PerPage => {
            if paths.has_offset_paths() {
                return Err(Error::invalid_value(
                    field,
                    "offset/limit paths given for per-page pagination",
                ));
            }
            Ok(Some(PaginationDescriptor::per_page(
                override_or(paths.page.as_ref(), &DEFAULT_PAGE_PATH, field)?,
                override_or(paths.per_page.as_ref(), &DEFAULT_PER_PAGE_PATH, field)?,
            )))
        }
        PaginationMode::Auto => {
            if paths.has_offset_paths() || paths.has_per_page_paths() {
                return Err(Error::invalid_value(
                    field,
                    "variable paths cannot be set when pagination_mode is auto",
                ));
            }
            Ok(None)
        }
    }
}

fn override_or(like: Option<&PathLike>, default: &[&str], field: &str) -> Result<Path> {
    match like {
        Some(like) => Path::require(field, like),
        None => Ok(Path::new(default.iter().copied())),
    }
}
