//! Configuration
//!
//! Hierarchical configuration for the `model-routes` tooling: inflection
//! additions, route table output, and logging. Files are layered with the
//! `config` crate and environment variables override every file.

use crate::inflect::InflectionConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::{ConfigLoader, ENV_PREFIX};
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::ENV_NAME_VAR;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra irregular and uncountable words.
    #[serde(default)]
    pub inflections: InflectionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Route table rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns, as printed by a Rails console.
    #[default]
    Sheet,
    /// Boxed table.
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print the column header (sheet format only).
    #[serde(default = "default_true")]
    pub header: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Sheet,
            header: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Logging(String),
    Inflections(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Inflections(msg) => write!(f, "Inflections: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl RoutesConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if let Err(e) = self.inflections.validate() {
            errors.push(ValidationError::Inflections(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
