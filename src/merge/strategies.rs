//! Merge strategy implementations

use super::types::{MergeContext, Merger};
use crate::extract::{ItemIdExtractor, ItemsExtractor, TotalCountExtractor};
use crate::pagination::{resolve_window, PaginationDescriptor};
use crate::path;
use crate::policy::StrictQueryPolicy;
use crate::types::{is_hole, ItemIdentity, MergeMode, HOLE};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build the merger a query policy asks for
pub fn create_merger(policy: &StrictQueryPolicy) -> Arc<dyn Merger> {
    match policy.merge_mode {
        MergeMode::Array => Arc::new(ArrayMerger::new(
            policy.field.clone(),
            policy.pagination.clone(),
        )),
        MergeMode::Wrapped => Arc::new(WrappedMerger {
            field: policy.field.clone(),
            pagination: policy.pagination.clone(),
            items: ItemsExtractor::new(Some(policy.items_path.clone())),
            total_count: TotalCountExtractor::new(Some(policy.total_count_path.clone())),
            item_id: ItemIdExtractor::new(Some(policy.item_id_path.clone())),
        }),
    }
}

/// Largest absolute index an items array may grow to
pub const MAX_SPARSE_INDEX: usize = 1 << 20;

/// Check that a page of `count` items at `offset` stays within `MAX_SPARSE_INDEX`
fn window_fits(offset: usize, count: usize) -> bool {
    count == 0
        || offset
            .checked_add(count - 1)
            .is_some_and(|last| last < MAX_SPARSE_INDEX)
}

/// Write `item` at absolute `index`, padding with holes as needed
fn place(items: &mut Vec<Value>, index: usize, item: Value) {
    if index >= items.len() {
        items.resize(index + 1, HOLE);
    }
    items[index] = item;
}

// ============================================================================
// Flat-array Merge
// ============================================================================

/// Positional merge for fields that return a bare array.
///
/// Each incoming item overwrites the slot at `offset + i`. Identities are
/// not tracked.
#[derive(Debug, Clone)]
pub struct ArrayMerger {
    /// Query field name (for logs)
    pub field: String,
    /// Pagination descriptor; `None` auto-detects per request
    pub pagination: Option<PaginationDescriptor>,
}

impl ArrayMerger {
    /// Create a new array merger
    pub fn new(field: impl Into<String>, pagination: Option<PaginationDescriptor>) -> Self {
        Self {
            field: field.into(),
            pagination,
        }
    }
}

impl Merger for ArrayMerger {
    fn merge(
        &self,
        existing: Option<&Value>,
        incoming: Option<&Value>,
        ctx: &MergeContext<'_>,
    ) -> Value {
        let window = resolve_window(self.pagination.as_ref(), ctx.variables);
        let mut merged = existing
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let incoming = incoming.and_then(Value::as_array);
        let count = incoming.map_or(0, Vec::len);
        if window_fits(window.offset, count) {
            for (i, item) in incoming.into_iter().flatten().enumerate() {
                place(&mut merged, window.offset + i, item.clone());
            }
        } else {
            warn!(
                field = %self.field,
                offset = window.offset,
                incoming = count,
                max_index = MAX_SPARSE_INDEX,
                "Page lies beyond the sparse index limit, keeping existing items"
            );
        }

        debug!(
            field = %self.field,
            offset = window.offset,
            incoming = incoming.map_or(0, Vec::len),
            merged = merged.len(),
            "Merged array page"
        );
        Value::Array(merged)
    }

    fn mode(&self) -> MergeMode {
        MergeMode::Array
    }
}

// ============================================================================
// Wrapped-object Merge
// ============================================================================

/// Identity-aware merge for fields that return an object wrapping an items
/// array plus metadata (total count, page info).
///
/// The result is a copy of the incoming payload with its items replaced by
/// the merged sparse array and its total count carried forward from the
/// existing payload when the incoming one omits it. When an item shows up
/// at a new position, its old slot becomes a hole, unless this page has
/// already overwritten that slot with a different item.
#[derive(Debug, Clone)]
pub struct WrappedMerger {
    /// Query field name (for logs)
    pub field: String,
    /// Pagination descriptor; `None` auto-detects per request
    pub pagination: Option<PaginationDescriptor>,
    /// Items array location
    pub items: ItemsExtractor,
    /// Total count location
    pub total_count: TotalCountExtractor,
    /// Item identity location
    pub item_id: ItemIdExtractor,
}

impl WrappedMerger {
    /// Create a wrapped merger with the default `results` / `totalCount` / `id` paths
    pub fn new(field: impl Into<String>, pagination: Option<PaginationDescriptor>) -> Self {
        Self {
            field: field.into(),
            pagination,
            items: ItemsExtractor::default(),
            total_count: TotalCountExtractor::default(),
            item_id: ItemIdExtractor::default(),
        }
    }

    fn identity(&self, item: &Value, ctx: &MergeContext<'_>) -> Option<ItemIdentity> {
        if is_hole(item) {
            return None;
        }
        self.item_id.get_item_id(item, ctx.reader)
    }

    /// Position of every identified item; later duplicates win
    fn index_positions(
        &self,
        items: &[Value],
        ctx: &MergeContext<'_>,
    ) -> HashMap<ItemIdentity, usize> {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| self.identity(item, ctx).map(|id| (id, index)))
            .collect()
    }
}

impl Merger for WrappedMerger {
    fn merge(
        &self,
        existing: Option<&Value>,
        incoming: Option<&Value>,
        ctx: &MergeContext<'_>,
    ) -> Value {
        let window = resolve_window(self.pagination.as_ref(), ctx.variables);

        let mut merged = self
            .items
            .get_items(existing)
            .cloned()
            .unwrap_or_default();
        let mut positions = self.index_positions(&merged, ctx);

        let new_items = self.items.get_items(incoming);
        let count = new_items.map_or(0, Vec::len);
        let placeable = if window_fits(window.offset, count) {
            new_items
        } else {
            warn!(
                field = %self.field,
                offset = window.offset,
                incoming = count,
                max_index = MAX_SPARSE_INDEX,
                "Page lies beyond the sparse index limit, keeping existing items"
            );
            None
        };
        for (i, item) in placeable.into_iter().flatten().enumerate() {
            if is_hole(item) {
                continue;
            }
            let target = window.offset + i;

            if let Some(id) = self.identity(item, ctx) {
                if let Some(previous) = positions.insert(id.clone(), target) {
                    // Only punch the old slot if it still holds this item;
                    // it may already have been overwritten by this page.
                    if previous != target
                        && merged
                            .get(previous)
                            .and_then(|slot| self.identity(slot, ctx))
                            .is_some_and(|slot_id| slot_id == id)
                    {
                        merged[previous] = HOLE;
                    }
                }
            }
            place(&mut merged, target, item.clone());
        }

        let merged_len = merged.len();
        let mut result = match incoming {
            Some(payload @ Value::Object(_)) => payload.clone(),
            _ => Value::Object(Map::new()),
        };

        if !path::write(&mut result, self.items.path(), Value::Array(merged)) {
            warn!(
                field = %self.field,
                path = %self.items.path(),
                "Failed to write merged items into payload"
            );
        }

        let total = self
            .total_count
            .get_total_count(incoming)
            .or_else(|| self.total_count.get_total_count(existing))
            .cloned();
        match total {
            Some(total) => {
                if !path::write(&mut result, self.total_count.path(), Value::Number(total)) {
                    warn!(
                        field = %self.field,
                        path = %self.total_count.path(),
                        "Failed to write total count into payload"
                    );
                }
            }
            None => warn!(
                field = %self.field,
                path = %self.total_count.path(),
                offset = window.offset,
                "No total count in incoming or existing payload"
            ),
        }

        debug!(
            field = %self.field,
            offset = window.offset,
            limit = window.limit,
            incoming = count,
            merged = merged_len,
            "Merged wrapped page"
        );
        result
    }

    fn mode(&self) -> MergeMode {
        MergeMode::Wrapped
    }
}
