//! CLI presentation: text and json formatters per command family.

mod shared;
mod strategies;

pub use shared::format_section_heading;
pub use strategies::{
    format_decision, format_explanation, format_regex_check, format_strategy_list_json,
    format_strategy_list_text, format_validation_result,
};
