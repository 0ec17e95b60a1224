//! CLI domain: parse, route, help, output, and presentation only.
//! No strategy logic; a single route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, strategy_summary};
pub use output::map_error;
pub use parse::{CauseArg, Cli, Commands, EvaluateArgs};
pub use presentation::{
    format_decision, format_explanation, format_regex_check, format_section_heading,
    format_strategy_list_json, format_strategy_list_text, format_validation_result,
};
pub use route::RunContext;
