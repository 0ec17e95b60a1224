//! Formatters for evaluate, list, validate and check-regex.

use super::shared::format_section_heading;
use crate::cli::help::strategy_summary;
use crate::config::ValidationError;
use crate::strategy::{BuildStrategy, FormValidation};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// `BUILD` or `SKIP`, colored when writing to a terminal.
pub fn format_decision(build: bool, color: bool) -> String {
    match (build, color) {
        (true, true) => format!("{}", "BUILD".green().bold()),
        (true, false) => "BUILD".to_string(),
        (false, true) => format!("{}", "SKIP".yellow().bold()),
        (false, false) => "SKIP".to_string(),
    }
}

/// Listener lines collected during evaluation, one per line.
pub fn format_explanation(lines: &[String]) -> String {
    if lines.is_empty() {
        return "(no strategy output)".to_string();
    }
    lines.join("\n")
}

fn collect_rows(strategy: &BuildStrategy, depth: usize, rows: &mut Vec<Vec<String>>) {
    rows.push(vec![
        format!("{}{}", "  ".repeat(depth), strategy.symbol()),
        strategy.display_name().to_string(),
        strategy_summary(strategy.symbol()).to_string(),
    ]);
    for child in strategy.children() {
        collect_rows(child, depth + 1, rows);
    }
}

/// Configured strategies as a table; nested strategies are indented under their composite.
pub fn format_strategy_list_text(strategies: &[BuildStrategy]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Build strategies")));
    if strategies.is_empty() {
        out.push_str("No strategies configured. Nothing will be built automatically.\n");
        return out;
    }
    let mut rows = Vec::new();
    for strategy in strategies {
        collect_rows(strategy, 0, &mut rows);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Symbol", "Name", "Summary"]);
    for row in rows {
        table.add_row(row);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_strategy_list_json(strategies: &[BuildStrategy]) -> Result<String, serde_json::Error> {
    let entries: Vec<serde_json::Value> = strategies
        .iter()
        .map(|s| {
            json!({
                "symbol": s.symbol(),
                "display_name": s.display_name(),
                "description": s.to_string(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({
        "strategies": entries,
        "total": strategies.len(),
    }))
}

pub fn format_validation_result(result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => "Configuration is valid".to_string(),
        Err(errors) => {
            let mut out = format!("Configuration has {} problem(s):\n", errors.len());
            for error in errors {
                out.push_str(&format!("  - {}\n", error));
            }
            out
        }
    }
}

pub fn format_regex_check(pattern: &str, validation: &FormValidation) -> String {
    match validation {
        FormValidation::Ok => format!("/{}/ is a valid regular expression", pattern),
        FormValidation::Error(message) => format!("/{}/ is invalid: {}", pattern, message),
    }
}
