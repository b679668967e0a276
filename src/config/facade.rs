//! Layered configuration loading.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::RoutesConfig;
use crate::error::AppError;
use config::{Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment prefix for overrides such as `MODEL_ROUTES__OUTPUT__FORMAT`.
pub const ENV_PREFIX: &str = "MODEL_ROUTES";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`.
    ///
    /// Layers, lowest first: built-in defaults, the global file, the
    /// workspace files, then `MODEL_ROUTES__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<RoutesConfig, AppError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder.add_source(Self::environment()).build()?;
        let routes_config: RoutesConfig = config.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(routes_config)
    }

    /// Load configuration from one explicit file, with defaults and
    /// environment overrides still applied.
    pub fn load_from_file(path: &Path) -> Result<RoutesConfig, AppError> {
        if !path.exists() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .add_source(Self::environment())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}
