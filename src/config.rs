//! Configuration
//!
//! The strategy set and logging settings, loaded from layered TOML files and the
//! environment by [`ConfigLoader`].

use crate::error::StrategyError;
use crate::logging::LoggingConfig;
use crate::strategy::{
    AnyBranchesStrategy, BuildStrategy, NameFilter, NamedBranchesStrategy, RegexNameFilter,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, ENV_VAR};

/// Legacy `[no_trigger]` table: a regex of branch names that get automatic builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoTriggerConfig {
    #[serde(default)]
    pub branches: Option<String>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategiesConfig {
    /// Configured strategies; a head builds when any of them says so.
    #[serde(default)]
    pub strategies: Vec<BuildStrategy>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_trigger: Option<NoTriggerConfig>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Strategy at a path like `strategies[0].strategies[2]`.
    Strategy(String, String),
    Filter(String, String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Strategy(path, msg) => write!(f, "Strategy '{}': {}", path, msg),
            ValidationError::Filter(path, msg) => write!(f, "Filter '{}': {}", path, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StrategiesConfig {
    /// Parse a single TOML document and apply the legacy migration.
    pub fn from_toml_str(text: &str) -> Result<Self, StrategyError> {
        let mut config: StrategiesConfig = toml::from_str(text)?;
        config.migrate_legacy()?;
        Ok(config)
    }

    /// Replace a legacy `[no_trigger]` table with an equivalent named-branch strategy.
    ///
    /// Returns whether anything was migrated.
    pub fn migrate_legacy(&mut self) -> Result<bool, StrategyError> {
        let Some(no_trigger) = self.no_trigger.take() else {
            return Ok(false);
        };
        let Some(branches) = no_trigger.branches.filter(|b| !b.trim().is_empty()) else {
            return Ok(false);
        };
        let filter = RegexNameFilter::new(Some(&branches), true)?;
        self.strategies
            .push(NamedBranchesStrategy::new(vec![NameFilter::from(filter)]).into());
        info!(
            branches = %branches,
            "Migrated legacy no_trigger branches to a named branches strategy"
        );
        Ok(true)
    }

    /// The strategy a host evaluates: the single configured one, or ANY over all of them.
    pub fn strategy(&self) -> BuildStrategy {
        match self.strategies.as_slice() {
            [single] => single.clone(),
            many => AnyBranchesStrategy::new(many.to_vec()).into(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for (i, strategy) in self.strategies.iter().enumerate() {
            validate_strategy(strategy, &format!("strategies[{}]", i), &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_strategy(strategy: &BuildStrategy, path: &str, errors: &mut Vec<ValidationError>) {
    match strategy {
        BuildStrategy::AllOf(_) | BuildStrategy::AnyOf(_) | BuildStrategy::NoneOf(_) => {
            if strategy.children().is_empty() {
                errors.push(ValidationError::Strategy(
                    path.to_string(),
                    format!("{} has no sub-strategies and never builds", strategy.symbol()),
                ));
            }
            for (i, child) in strategy.children().iter().enumerate() {
                validate_strategy(child, &format!("{}.strategies[{}]", path, i), errors);
            }
        }
        BuildStrategy::Tags(tags) if tags.is_degenerate() => {
            errors.push(ValidationError::Strategy(
                path.to_string(),
                format!(
                    "at_least_days ({}) exceeds at_most_days ({}); no tag can ever build",
                    tags.at_least_days(),
                    tags.at_most_days()
                ),
            ));
        }
        BuildStrategy::Named(named) => {
            for (i, filter) in named.filters().iter().enumerate() {
                if let NameFilter::Exact(exact) = filter {
                    if exact.name().trim().is_empty() {
                        errors.push(ValidationError::Filter(
                            format!("{}.filters[{}]", path, i),
                            "exact name cannot be empty".to_string(),
                        ));
                    }
                }
            }
        }
        BuildStrategy::Custom(custom) => {
            errors.push(ValidationError::Strategy(
                path.to_string(),
                format!(
                    "custom strategy '{}' cannot be described in configuration",
                    custom.name()
                ),
            ));
        }
        _ => {}
    }
}
