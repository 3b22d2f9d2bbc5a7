//! Tests for path module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Normalization Tests
// ============================================================================

#[test_case("results", &["results"]; "single segment")]
#[test_case("data.items", &["data", "items"]; "dotted")]
#[test_case("$.data.items", &["data", "items"]; "root marker")]
#[test_case("data.items[0].id", &["data", "items", "0", "id"]; "bracket index")]
#[test_case("a..b", &["a", "b"]; "empty segments dropped")]
#[test_case("", &[]; "empty string")]
#[test_case("$", &[]; "bare root marker")]
fn test_from_dotted(input: &str, expected: &[&str]) {
    assert_eq!(Path::from_dotted(input).segments(), expected);
}

#[test]
fn test_from_like_segments_kept_verbatim() {
    let like = PathLike::Segments(vec!["a.b".to_string(), "c".to_string()]);
    assert_eq!(Path::from_like(&like), Path::new(["a.b", "c"]));
}

#[test]
fn test_require_rejects_empty() {
    let err = Path::require("items_path", &PathLike::from("")).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("items_path"));

    let err = Path::require("items_path", &PathLike::Segments(vec![])).unwrap_err();
    assert!(err.is_config_error());

    let path = Path::require("items_path", &PathLike::from("data.items")).unwrap();
    assert_eq!(path.len(), 2);
}

#[test]
fn test_path_like_deserialize() {
    let like: PathLike = serde_yaml::from_str("data.items").unwrap();
    assert_eq!(like, PathLike::Dotted("data.items".to_string()));

    let like: PathLike = serde_yaml::from_str("[pagination, offset]").unwrap();
    assert_eq!(Path::from_like(&like), Path::new(["pagination", "offset"]));
}

#[test]
fn test_display_and_join() {
    let path = Path::new(["pagination"]).join("offset");
    assert_eq!(path.to_string(), "pagination.offset");
}

// ============================================================================
// Read Tests
// ============================================================================

#[test]
fn test_read_nested() {
    let root = json!({"data": {"items": [{"id": 1}, {"id": 2}]}});

    assert_eq!(
        read(&root, &Path::from_dotted("data.items.1.id")),
        Some(&json!(2))
    );
    assert_eq!(read(&root, &Path::from_dotted("data.items")).unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn test_read_missing_returns_none() {
    let root = json!({"data": {"items": [1, 2], "count": 3}});

    assert_eq!(read(&root, &Path::from_dotted("data.missing")), None);
    assert_eq!(read(&root, &Path::from_dotted("data.items.5")), None);
    assert_eq!(read(&root, &Path::from_dotted("data.items.first")), None);
    assert_eq!(read(&root, &Path::from_dotted("data.count.value")), None);
    assert_eq!(read(&json!(7), &Path::from_dotted("a")), None);
}

#[test]
fn test_read_numeric_key_on_object() {
    let root = json!({"0": "zero"});
    assert_eq!(read(&root, &Path::from_dotted("0")), Some(&json!("zero")));
}

#[test]
fn test_read_empty_path_is_root() {
    let root = json!({"a": 1});
    assert_eq!(read(&root, &Path::default()), Some(&root));
}

// ============================================================================
// Write Tests
// ============================================================================

#[test]
fn test_write_existing() {
    let mut root = json!({"data": {"total": 1}});
    assert!(write(&mut root, &Path::from_dotted("data.total"), json!(9)));
    assert_eq!(root, json!({"data": {"total": 9}}));
}

#[test]
fn test_write_creates_objects_and_arrays() {
    let mut root = json!({});
    assert!(write(&mut root, &Path::from_dotted("data.items.2.name"), json!("c")));
    assert_eq!(
        root,
        json!({"data": {"items": [null, null, {"name": "c"}]}})
    );
}

#[test]
fn test_write_replaces_null_intermediate() {
    let mut root = json!({"data": null});
    assert!(write(&mut root, &Path::from_dotted("data.items"), json!([1])));
    assert_eq!(root, json!({"data": {"items": [1]}}));
}

#[test]
fn test_write_pads_array() {
    let mut root = json!([1]);
    assert!(write(&mut root, &Path::from_dotted("3"), json!(4)));
    assert_eq!(root, json!([1, null, null, 4]));
}

#[test]
fn test_write_blocked_by_scalar() {
    let mut root = json!({"data": "oops"});
    assert!(!write(&mut root, &Path::from_dotted("data.items"), json!([])));
    assert_eq!(root, json!({"data": "oops"}));

    let mut root = json!(5);
    assert!(!write(&mut root, &Path::from_dotted("a"), json!(1)));
    assert_eq!(root, json!(5));
}

#[test]
fn test_write_non_numeric_segment_on_array() {
    let mut root = json!({"items": [1, 2]});
    assert!(!write(&mut root, &Path::from_dotted("items.first"), json!(0)));
    assert!(!write(&mut root, &Path::from_dotted("items.first.x"), json!(0)));
    assert_eq!(root, json!({"items": [1, 2]}));
}

#[test]
fn test_write_empty_path() {
    let mut root = json!({});
    assert!(!write(&mut root, &Path::default(), json!(1)));
}
