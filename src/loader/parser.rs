//! YAML parser for policy files
//!
//! Parses and validates policy YAML files.

use crate::error::{Error, Result};
use crate::policy::{build_cache_policies, normalize, CachePolicies, PolicyFile};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a policy file from disk
pub fn load_policies(path: impl AsRef<Path>) -> Result<PolicyFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read policy file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    debug!(path = %path.display(), "Loaded policy file");
    load_policies_from_str(&content)
}

/// Load a policy file from a YAML (or JSON) string
pub fn load_policies_from_str(yaml: &str) -> Result<PolicyFile> {
    let file: PolicyFile = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse policy YAML: {e}")))?;

    validate_policies(&file)?;
    Ok(file)
}

/// Load a policy file and build its cache policies
pub fn load_cache_policies(path: impl AsRef<Path>) -> Result<CachePolicies> {
    let file = load_policies(path)?;
    build_cache_policies(&file.queries)
}

/// Validate a policy file
fn validate_policies(file: &PolicyFile) -> Result<()> {
    if file.queries.is_empty() {
        return Err(Error::config("Policy file must define at least one query"));
    }

    let mut seen = HashSet::new();
    for query in &file.queries {
        if !seen.insert(query.field.as_str()) {
            return Err(Error::duplicate_field(&query.field));
        }
        normalize(query)?;
    }

    Ok(())
}
