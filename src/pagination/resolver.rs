//! Window resolution
//!
//! Turns a request's variables into a [`MergeWindow`]. Never fails: absent,
//! non-numeric or negative variables fall back to per-variable defaults.

use super::types::{MergeWindow, PaginationDescriptor};
use crate::path::{self, Path};
use serde_json::Value;
use tracing::debug;

const DEFAULT_OFFSET: usize = 0;
const DEFAULT_LIMIT: usize = 0;
const DEFAULT_PAGE: usize = 1;
const DEFAULT_PER_PAGE: usize = 0;

/// Resolve the merge window for a request.
///
/// With no descriptor, the vocabulary is inferred from the variables via
/// [`detect_descriptor`]; if nothing matches, the window is `{0, 0}`.
pub fn resolve_window(
    descriptor: Option<&PaginationDescriptor>,
    variables: &Value,
) -> MergeWindow {
    let window = match descriptor {
        Some(descriptor) => descriptor.resolve(variables),
        None => detect_descriptor(variables)
            .map_or_else(MergeWindow::empty, |detected| detected.resolve(variables)),
    };
    debug!(
        offset = window.offset,
        limit = window.limit,
        "Resolved merge window"
    );
    window
}

impl PaginationDescriptor {
    /// Resolve the window this descriptor reads from `variables`
    pub fn resolve(&self, variables: &Value) -> MergeWindow {
        match self {
            Self::Offset {
                offset_path,
                limit_path,
            } => MergeWindow::new(
                read_count(variables, offset_path).unwrap_or(DEFAULT_OFFSET),
                read_count(variables, limit_path).unwrap_or(DEFAULT_LIMIT),
            ),
            Self::PerPage {
                page_path,
                per_page_path,
            } => {
                let per_page = read_count(variables, per_page_path).unwrap_or(DEFAULT_PER_PAGE);
                // Without a page size nothing new can have been fetched
                if per_page == 0 {
                    return MergeWindow::empty();
                }
                let page = read_count(variables, page_path).unwrap_or(DEFAULT_PAGE).max(1);
                MergeWindow::new((page - 1).saturating_mul(per_page), per_page)
            }
        }
    }
}

/// Infer a descriptor from the shape of a variables object.
///
/// Looks inside a `pagination` sub-object when there is one, otherwise at
/// the root. `page`/`perPage` keys win over `offset`/`limit` keys when
/// both are present.
pub fn detect_descriptor(variables: &Value) -> Option<PaginationDescriptor> {
    let (container, base) = match variables.get("pagination") {
        Some(nested @ Value::Object(_)) => (nested, Path::new(["pagination"])),
        _ => (variables, Path::default()),
    };
    let map = container.as_object()?;

    if map.contains_key("page") || map.contains_key("perPage") {
        return Some(PaginationDescriptor::per_page(
            base.join("page"),
            base.join("perPage"),
        ));
    }
    if map.contains_key("offset") || map.contains_key("limit") {
        return Some(PaginationDescriptor::offset(
            base.join("offset"),
            base.join("limit"),
        ));
    }
    None
}

fn read_count(variables: &Value, at: &Path) -> Option<usize> {
    coerce_non_negative(path::read(variables, at)?)
}

/// Coerce a JSON value into a non-negative integer.
///
/// Numbers and numeric strings (`"3"`, `" 4.5 "`) are accepted and
/// truncated toward zero. Negative, non-finite, empty and non-numeric
/// values yield `None`.
pub fn coerce_non_negative(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return usize::try_from(u).ok().or(Some(usize::MAX));
            }
            n.as_f64()?
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.trunc() as usize)
}
