//! Merge rules: built-in defaults underneath every file and env layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Config builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("output.format", "sheet")?
        .set_default("output.header", true)?
        .set_default("logging.enabled", false)?
        .set_default("logging.level", "info")?)
}
