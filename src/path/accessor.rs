//! Nested read/write over `serde_json::Value`

use super::types::{segment_index, Path};
use serde_json::{Map, Value};

/// Read the value at `path`.
///
/// Returns `None` on any missing key, out-of-range index or scalar in the
/// way. An empty path reads the root itself.
pub fn read<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate containers as needed.
///
/// Missing (or `null`) intermediates become arrays when the next segment
/// is numeric and objects otherwise. Returns `false` without touching
/// `root` when the root or an intermediate is a scalar, when a non-numeric
/// segment addresses an array, or when the path is empty.
pub fn write(root: &mut Value, path: &Path, value: Value) -> bool {
    if path.is_empty() || !is_container(root) {
        return false;
    }
    write_at(root, path.segments(), value)
}

fn write_at(node: &mut Value, segments: &[String], value: Value) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };

    if rest.is_empty() {
        return match slot_mut(node, head) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        };
    }

    // Check the child before creating anything so a blocked write leaves
    // the tree untouched.
    if !child_accepts_descent(node, head) {
        return false;
    }

    let Some(child) = slot_mut(node, head) else {
        return false;
    };
    if child.is_null() {
        *child = empty_container_for(&rest[0]);
    }
    write_at(child, rest, value)
}

/// Get a mutable slot for `segment`, inserting a `null` placeholder
/// (or padding an array with holes) when it does not exist yet.
fn slot_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = segment_index(segment)?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

fn child_accepts_descent(node: &Value, segment: &str) -> bool {
    let child = match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => match segment_index(segment) {
            Some(index) => items.get(index),
            None => return false,
        },
        _ => return false,
    };
    child.map_or(true, |c| c.is_null() || is_container(c))
}

fn empty_container_for(segment: &str) -> Value {
    if segment_index(segment).is_some() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}
