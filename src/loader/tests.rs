//! Tests for YAML loader module

use super::*;
use crate::error::Error;
use crate::pagination::{PaginationDescriptor, PaginationMode};
use crate::path::{Path, PathLike};
use crate::policy::{IdentityFieldsDef, KeyFields};
use crate::types::MergeMode;
use std::io::Write;
use tempfile::NamedTempFile;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_minimal_policy() {
    let yaml = r#"
queries:
  - field: things
"#;

    let file = load_policies_from_str(yaml).unwrap();
    assert_eq!(file.version, "1.0");
    assert_eq!(file.queries.len(), 1);

    let query = &file.queries[0];
    assert_eq!(query.field, "things");
    assert!(query.entity_typename.is_none());
    assert_eq!(query.pagination_mode, PaginationMode::Offset);
    assert_eq!(query.merge_mode, MergeMode::Wrapped);
}

#[test]
fn test_load_full_policy() {
    let yaml = r#"
version: "2.0"
queries:
  - field: things
    entity_typename: Thing
    identity_fields: [id, tenant]
    cache_key_variables: [filter, pagination.perPage]
    items_path: data.items
    total_count_path: [data, total]
    item_id_path: id
    pagination_mode: per_page
    pagination_variable_paths:
      page: pagination.page
      perPage: pagination.size
    merge_mode: wrapped
  - field: tags
    entity_typename: Tag
    identity_fields: false
    merge_mode: array
    pagination_mode: auto
"#;

    let file = load_policies_from_str(yaml).unwrap();
    assert_eq!(file.version, "2.0");

    let things = &file.queries[0];
    assert_eq!(
        things.identity_fields,
        Some(IdentityFieldsDef::Fields(vec![
            "id".to_string(),
            "tenant".to_string()
        ]))
    );
    assert_eq!(things.items_path, Some(PathLike::from("data.items")));
    assert_eq!(
        things.pagination_variable_paths.per_page,
        Some(PathLike::from("pagination.size"))
    );

    let tags = &file.queries[1];
    assert_eq!(tags.identity_fields, Some(IdentityFieldsDef::Flag(false)));
    assert_eq!(tags.merge_mode, MergeMode::Array);
}

#[test]
fn test_load_json_policy() {
    let json = r#"{"queries": [{"field": "things", "items_path": ["data", "items"]}]}"#;

    let file = load_policies_from_str(json).unwrap();
    assert_eq!(
        file.queries[0].items_path,
        Some(PathLike::Segments(vec!["data".to_string(), "items".to_string()]))
    );
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_load_rejects_empty_file() {
    let err = load_policies_from_str("queries: []").unwrap_err();
    assert!(err.to_string().contains("at least one query"));
}

#[test]
fn test_load_rejects_duplicate_fields() {
    let yaml = r#"
queries:
  - field: things
  - field: things
"#;

    let err = load_policies_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::DuplicateField { .. }));
}

#[test]
fn test_load_rejects_empty_items_path() {
    let yaml = r#"
queries:
  - field: things
    items_path: ""
"#;

    let err = load_policies_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }));
}

#[test]
fn test_load_rejects_identity_true() {
    let yaml = r#"
queries:
  - field: things
    entity_typename: Thing
    identity_fields: true
"#;

    let err = load_policies_from_str(yaml).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_load_rejects_bad_mode() {
    let yaml = r#"
queries:
  - field: things
    pagination_mode: cursor
"#;

    let err = load_policies_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("Failed to parse policy YAML"));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_cache_policies_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
queries:
  - field: things
    entity_typename: Thing
    pagination_mode: per_page
  - field: otherThings
    entity_typename: Thing
    identity_fields: [otherId]
"#
    )
    .unwrap();

    let registry = load_cache_policies(file.path()).unwrap();

    assert_eq!(
        registry.type_policy("Thing").unwrap().key_fields,
        KeyFields::Fields(vec!["id".to_string()])
    );
    assert_eq!(
        registry.field("things").unwrap().pagination(),
        Some(&PaginationDescriptor::per_page(
            Path::new(["pagination", "page"]),
            Path::new(["pagination", "perPage"]),
        ))
    );
    assert!(registry.field("otherThings").is_some());
}

#[test]
fn test_load_missing_file() {
    let err = load_policies("/nonexistent/policies.yaml").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
