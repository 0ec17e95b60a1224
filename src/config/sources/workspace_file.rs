//! Workspace config file source: .branch-strategies.toml and
//! .branch-strategies.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};

/// Selects the environment-specific overlay file.
pub const ENV_VAR: &str = "BRANCH_STRATEGIES_ENV";

const FILE_STEM: &str = ".branch-strategies";

/// Base workspace config file.
pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(format!("{}.toml", FILE_STEM))
}

/// Add workspace config files to builder.
/// Precedence: .branch-strategies.toml then .branch-strategies.{BRANCH_STRATEGIES_ENV}.toml
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_config_path(workspace_root);
    if base_config_path.exists() {
        builder = builder.add_source(
            File::from(base_config_path.as_path())
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    if let Ok(env_name) = std::env::var(ENV_VAR) {
        let env_config_path = workspace_root.join(format!("{}.{}.toml", FILE_STEM, env_name));
        if env_config_path.exists() {
            builder = builder.add_source(
                File::from(env_config_path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
    }

    Ok(builder)
}
