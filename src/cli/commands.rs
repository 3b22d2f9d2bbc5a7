//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Merge CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache policy file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub policies: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a policy file and print the registered policies
    Validate,

    /// Resolve the merge window for request variables
    Window {
        /// Request variables (JSON)
        #[arg(long)]
        variables: String,

        /// Query field whose pagination descriptor to use (auto-detect if omitted)
        #[arg(long)]
        field: Option<String>,
    },

    /// Replay responses through a field's merge function
    Merge {
        /// Query field to merge into
        #[arg(long)]
        field: String,

        /// JSON file with an array of `{ "variables": ..., "response": ... }` pages
        #[arg(long)]
        pages: PathBuf,

        /// JSON file of normalized entities for resolving `__ref` items
        #[arg(long)]
        entities: Option<PathBuf>,
    },
}
