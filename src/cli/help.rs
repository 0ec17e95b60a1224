//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string recorded with every command log line.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Evaluate(_) => "evaluate",
        Commands::List { .. } => "list",
        Commands::Validate => "validate",
        Commands::CheckRegex { .. } => "check-regex",
    }
}

/// One-line summary shown by `list` for each strategy symbol.
pub fn strategy_summary(symbol: &str) -> &'static str {
    match symbol {
        "buildAllBranches" => "Builds when every sub-strategy builds",
        "buildAnyBranches" => "Builds when at least one sub-strategy builds",
        "buildNoneBranches" => "Builds when no sub-strategy builds",
        "buildNamedBranches" => "Builds branches whose name passes a filter",
        "buildRegularBranches" => "Builds branches that are neither tags nor change requests",
        "buildChangeRequests" => "Builds change requests",
        "buildTags" => "Builds tags within an age window",
        "skipUserCause" => "Skips builds a user asked for",
        "skipInitialBuildOnFirstBranchIndexing" => "Skips heads the previous scan never saw",
        "skipInitialBuildOnIndexingCause" => "Skips unseen heads found by branch indexing",
        _ => "Host-provided strategy",
    }
}
