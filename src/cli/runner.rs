//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::error::{Error, Result};
use crate::extract::{IdentityReader, InlineReader, ReferenceReader};
use crate::loader::load_policies;
use crate::merge::MergeContext;
use crate::pagination::resolve_window;
use crate::policy::{build_registry, normalize, CachePolicies, Diagnostic};
use anyhow::Context as _;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One recorded response in a `merge` pages file
#[derive(Debug, Clone, Deserialize)]
pub struct PageRecord {
    /// Variables of the request
    #[serde(default)]
    pub variables: Value,
    /// Response value for the query field (absent = `null`)
    #[serde(default)]
    pub response: Option<Value>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let output = match &self.cli.command {
            Commands::Validate => self.validate()?,
            Commands::Window { variables, field } => self.window(variables, field.as_deref())?,
            Commands::Merge {
                field,
                pages,
                entities,
            } => self.merge(field, pages, entities.as_deref())?,
        };
        self.print(&output)
    }

    /// Load the policy file and build the registry
    fn load_registry(&self) -> Result<(CachePolicies, Vec<Diagnostic>)> {
        let path = self
            .cli
            .policies
            .as_ref()
            .ok_or_else(|| Error::config("Policy file not specified (use -p flag)"))?;
        let file = load_policies(path)?;
        let policies = file.queries.iter().map(normalize).collect::<Result<Vec<_>>>()?;
        build_registry(&policies)
    }

    fn validate(&self) -> Result<Value> {
        let (registry, diagnostics) = self.load_registry()?;
        for diagnostic in &diagnostics {
            warn!(%diagnostic, "Cache policy diagnostic");
        }
        info!(fields = registry.fields().count(), "Policy file is valid");

        Ok(json!({
            "diagnostics": diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "policies": registry.to_json(),
        }))
    }

    fn window(&self, variables: &str, field: Option<&str>) -> Result<Value> {
        let variables: Value = serde_json::from_str(variables)?;
        let window = match field {
            Some(field) => {
                let (registry, _) = self.load_registry()?;
                resolve_window(registry.require_field(field)?.pagination(), &variables)
            }
            None => resolve_window(None, &variables),
        };
        Ok(serde_json::to_value(window)?)
    }

    /// Replay pages into a storage-key-indexed store, like a host cache would
    fn merge(&self, field: &str, pages: &Path, entities: Option<&Path>) -> Result<Value> {
        let (registry, _) = self.load_registry()?;
        let policy = registry.require_field(field)?;

        let pages: Vec<PageRecord> = serde_json::from_value(read_json_file(pages)?)?;
        let entities = match entities {
            Some(path) => match read_json_file(path)? {
                Value::Object(map) => map,
                _ => return Err(Error::config("Entities file must contain a JSON object")),
            },
            None => Map::new(),
        };
        let reference_reader = ReferenceReader::new(&entities);
        let reader: &dyn IdentityReader = if entities.is_empty() {
            &InlineReader
        } else {
            &reference_reader
        };

        let mut store: BTreeMap<String, Value> = BTreeMap::new();
        for page in &pages {
            let key = policy.storage_key(&page.variables);
            let ctx = MergeContext::with_reader(&page.variables, reader);
            let merged = policy.merge(store.get(&key), page.response.as_ref(), &ctx);
            store.insert(key, merged);
        }
        info!(field, pages = pages.len(), entries = store.len(), "Replayed pages");

        Ok(Value::Object(store.into_iter().collect()))
    }

    fn print(&self, value: &Value) -> Result<()> {
        let rendered = if self.cli.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{rendered}");
        Ok(())
    }
}

fn read_json_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in '{}'", path.display()))?;
    Ok(value)
}
