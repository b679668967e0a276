//! Global config file source: $XDG_CONFIG_HOME/model-routes/config.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the global config file, if a config directory can be resolved.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("model-routes").join("config.toml"))
}

/// Add the global config file to `builder` when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(builder);
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global configuration file");
        return Ok(builder);
    }
    debug!(config_path = %path.display(), "Using global configuration file");
    Ok(builder.add_source(File::from(path.as_path()).required(false)))
}
