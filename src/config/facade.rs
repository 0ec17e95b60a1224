//! Config loader: layers every source and deserializes the result.

use super::merge::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::StrategiesConfig;
use crate::error::StrategyError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Prefix for environment overrides, e.g. `BRANCH_STRATEGIES_LOGGING__LEVEL=debug`.
const ENV_PREFIX: &str = "BRANCH_STRATEGIES";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<StrategiesConfig, StrategyError> {
        let global = global_file::global_config_path();
        Self::load_with_global(workspace_root, global.as_deref())
    }

    /// Same as [`ConfigLoader::load`] with an explicit global file (or none).
    pub fn load_with_global(
        workspace_root: &Path,
        global_path: Option<&Path>,
    ) -> Result<StrategiesConfig, StrategyError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global_path)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(environment());
        Self::finish(builder.build()?)
    }

    /// Load a single file on top of the defaults. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<StrategiesConfig, StrategyError> {
        if !path.exists() {
            return Err(StrategyError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?;
        Self::finish(config)
    }

    fn finish(config: Config) -> Result<StrategiesConfig, StrategyError> {
        let mut strategies: StrategiesConfig = config.try_deserialize()?;
        strategies.migrate_legacy()?;
        debug!(
            strategies = strategies.strategies.len(),
            "Loaded strategy configuration"
        );
        Ok(strategies)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
