//! CLI parse: clap types for branch-strategies. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// branch-strategies CLI - decide whether a discovered head gets an automatic build
#[derive(Parser)]
#[command(name = "branch-strategies")]
#[command(about = "Evaluate branch build strategies against a described head")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the configured strategies against one head
    Evaluate(EvaluateArgs),
    /// List the configured strategies
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate the loaded configuration
    Validate,
    /// Check that a regular expression compiles
    CheckRegex {
        /// Expression to check
        pattern: String,
    },
}

/// Head description for `evaluate`. Exactly one of --branch, --tag or --change-request.
#[derive(Args, Debug, Clone)]
#[command(group(
    clap::ArgGroup::new("head")
        .required(true)
        .args(["branch", "tag", "change_request"])
))]
pub struct EvaluateArgs {
    /// Evaluate a branch with this name
    #[arg(long)]
    pub branch: Option<String>,

    /// Evaluate a tag with this name
    #[arg(long)]
    pub tag: Option<String>,

    /// Age of the tag in days
    #[arg(long, default_value_t = 0, requires = "tag")]
    pub tag_age_days: i64,

    /// Evaluate the change request with this id
    #[arg(long)]
    pub change_request: Option<String>,

    /// Branch the change request targets
    #[arg(long, default_value = "master")]
    pub target: String,

    /// Build the change request merged into its target
    #[arg(long, requires = "change_request")]
    pub merge: bool,

    /// Current revision hash (origin side for change requests)
    #[arg(long, default_value = "HEAD")]
    pub revision: String,

    /// Current target revision hash, for change requests
    #[arg(long, default_value = "TARGET")]
    pub target_revision: String,

    /// Revision hash of the last build
    #[arg(long)]
    pub last_built: Option<String>,

    /// Target revision hash of the last build, for change requests
    #[arg(long, requires = "last_built")]
    pub last_built_target: Option<String>,

    /// Revision hash found by the previous scan
    #[arg(long)]
    pub last_seen: Option<String>,

    /// What triggered the evaluation (repeatable)
    #[arg(long, value_enum)]
    pub cause: Vec<CauseArg>,

    /// User id reported for --cause user
    #[arg(long, default_value = "cli")]
    pub user: String,

    /// Treat the change request author as untrusted
    #[arg(long)]
    pub untrusted: bool,

    /// Print what the strategies reported while deciding
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CauseArg {
    User,
    Indexing,
    Other,
}
