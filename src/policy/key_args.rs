//! Cache key arguments
//!
//! `cache_key_variables` entries are dot specs such as `filter` or
//! `pagination.perPage`. They compile into a tree that decides which
//! request variables distinguish one cache entry from another; everything
//! else (typically offset/page) is shared so pages merge into one entry.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Which part of a variable contributes to the key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySelection {
    /// The whole value
    Whole,
    /// Only the listed sub-fields
    Fields(Vec<KeyArg>),
}

/// One key argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyArg {
    /// Variable name at this level
    pub name: String,
    /// Selected part of its value
    pub selection: KeySelection,
}

/// Ordered set of key arguments for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyArgs(Vec<KeyArg>);

impl KeyArgs {
    /// Compile dot specs into a key-argument tree.
    ///
    /// Specs sharing a prefix merge (`pagination.perPage` and
    /// `pagination.sort` select two fields of `pagination`); a bare
    /// `pagination` selects the whole value and absorbs any nested spec.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let mut args = Vec::new();
        for spec in specs {
            let spec = spec.as_ref();
            let segments: Vec<&str> = spec.split('.').collect();
            if segments.iter().any(|s| s.trim().is_empty()) {
                return Err(Error::invalid_value(
                    "cache_key_variables",
                    format!("'{spec}' is not a valid variable spec"),
                ));
            }
            insert(&mut args, &segments);
        }
        Ok(Self(args))
    }

    /// Top-level key arguments
    pub fn args(&self) -> &[KeyArg] {
        &self.0
    }

    /// Whether no variables contribute to the key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nested-array form used by the host cache (`["filter", "pagination", ["perPage"]]`).
    ///
    /// `false` when there are no key arguments, meaning "ignore all variables".
    pub fn to_json(&self) -> Value {
        if self.0.is_empty() {
            return Value::Bool(false);
        }
        Value::Array(specifier(&self.0))
    }

    /// Project `variables` down to the parts selected by these key args.
    ///
    /// Absent variables are omitted.
    pub fn project(&self, variables: &Value) -> Map<String, Value> {
        project(&self.0, variables)
    }
}

fn insert(args: &mut Vec<KeyArg>, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let position = match args.iter().position(|arg| arg.name == *head) {
        Some(position) => position,
        None => {
            args.push(KeyArg {
                name: (*head).to_string(),
                selection: if rest.is_empty() {
                    KeySelection::Whole
                } else {
                    KeySelection::Fields(Vec::new())
                },
            });
            args.len() - 1
        }
    };

    let arg = &mut args[position];
    if rest.is_empty() {
        arg.selection = KeySelection::Whole;
        return;
    }
    if let KeySelection::Fields(children) = &mut arg.selection {
        insert(children, rest);
    }
}

fn specifier(args: &[KeyArg]) -> Vec<Value> {
    let mut out = Vec::new();
    for arg in args {
        out.push(Value::String(arg.name.clone()));
        if let KeySelection::Fields(children) = &arg.selection {
            out.push(Value::Array(specifier(children)));
        }
    }
    out
}

fn project(args: &[KeyArg], variables: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    for arg in args {
        let Some(value) = variables.get(&arg.name) else {
            continue;
        };
        let projected = match (&arg.selection, value) {
            (KeySelection::Fields(children), Value::Object(_)) => {
                Value::Object(project(children, value))
            }
            _ => value.clone(),
        };
        out.insert(arg.name.clone(), projected);
    }
    out
}
