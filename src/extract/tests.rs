//! Tests for extract module

use super::*;
use crate::path::Path;
use crate::types::ItemIdentity;
use serde_json::json;

// ============================================================================
// Items Extractor Tests
// ============================================================================

#[test]
fn test_items_default_path() {
    let extractor = ItemsExtractor::default();
    let payload = json!({"results": [{"id": 1}], "totalCount": 1});

    assert_eq!(extractor.path(), &Path::new(["results"]));
    assert_eq!(extractor.get_items(Some(&payload)).unwrap().len(), 1);
}

#[test]
fn test_items_absent_vs_empty() {
    let extractor = ItemsExtractor::new(Some(Path::from_dotted("data.items")));

    let empty = json!({"data": {"items": []}});
    assert_eq!(extractor.get_items(Some(&empty)).map(Vec::len), Some(0));

    let missing = json!({"data": {}});
    assert!(extractor.get_items(Some(&missing)).is_none());

    let not_array = json!({"data": {"items": {"0": "a"}}});
    assert!(extractor.get_items(Some(&not_array)).is_none());

    assert!(extractor.get_items(None).is_none());
}

// ============================================================================
// Total Count Extractor Tests
// ============================================================================

#[test]
fn test_total_count_numbers_only() {
    let extractor = TotalCountExtractor::default();

    let payload = json!({"totalCount": 9});
    assert_eq!(extractor.get_total_count(Some(&payload)).and_then(|n| n.as_u64()), Some(9));

    let payload = json!({"totalCount": "9"});
    assert!(extractor.get_total_count(Some(&payload)).is_none());

    let payload = json!({"totalCount": null});
    assert!(extractor.get_total_count(Some(&payload)).is_none());

    assert!(extractor.get_total_count(None).is_none());
}

#[test]
fn test_total_count_custom_path() {
    let extractor = TotalCountExtractor::new(Some(Path::from_dotted("meta.total")));
    let payload = json!({"meta": {"total": 120}});

    assert_eq!(
        extractor.get_total_count(Some(&payload)).and_then(|n| n.as_u64()),
        Some(120)
    );
}

// ============================================================================
// Item Id Extractor Tests
// ============================================================================

#[test]
fn test_item_id_inline() {
    let extractor = ItemIdExtractor::default();

    assert_eq!(
        extractor.get_item_id(&json!({"id": 7}), &InlineReader),
        Some(ItemIdentity::Number("7".to_string()))
    );
    assert_eq!(
        extractor.get_item_id(&json!({"id": "a-1"}), &InlineReader),
        Some(ItemIdentity::Text("a-1".to_string()))
    );
    assert_eq!(extractor.get_item_id(&json!({"id": null}), &InlineReader), None);
    assert_eq!(extractor.get_item_id(&json!({"id": [1]}), &InlineReader), None);
    assert_eq!(extractor.get_item_id(&json!({"name": "x"}), &InlineReader), None);
    assert_eq!(extractor.get_item_id(&json!(42), &InlineReader), None);
}

#[test]
fn test_item_id_nested_path() {
    let extractor = ItemIdExtractor::new(Some(Path::from_dotted("node.uuid")));
    let item = json!({"node": {"uuid": "u-9"}});

    assert_eq!(
        extractor.get_item_id(&item, &InlineReader),
        Some(ItemIdentity::Text("u-9".to_string()))
    );
}

// ============================================================================
// Reference Reader Tests
// ============================================================================

#[test]
fn test_reference_reader_resolves_refs() {
    let entities = json!({
        "Thing:1": {"__typename": "Thing", "id": 1},
        "Thing:2": {"__typename": "Thing", "id": 2}
    });
    let entities = entities.as_object().unwrap();
    let reader = ReferenceReader::new(entities);
    let extractor = ItemIdExtractor::default();

    assert_eq!(
        extractor.get_item_id(&json!({"__ref": "Thing:2"}), &reader),
        Some(ItemIdentity::Number("2".to_string()))
    );
    // Inline items still work
    assert_eq!(
        extractor.get_item_id(&json!({"id": 5}), &reader),
        Some(ItemIdentity::Number("5".to_string()))
    );
    // Dangling reference
    assert_eq!(extractor.get_item_id(&json!({"__ref": "Thing:3"}), &reader), None);
}
