//! Logging
//!
//! Structured logging through `tracing`. The library only emits events; the
//! binary decides whether a subscriber is installed and where it writes.
//! Route tables go to stdout, so log output defaults to stderr.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "MODEL_ROUTES_LOG";
pub const LOG_FORMAT_ENV: &str = "MODEL_ROUTES_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "MODEL_ROUTES_LOG_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
}

impl LogOutput {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            other => Err(AppError::Logging(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all.
    #[serde(default)]
    pub enabled: bool,

    /// trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_format")]
    pub format: LogFormat,

    #[serde(default = "default_output")]
    pub output: LogOutput,

    /// Used when `output` is `file`.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Colored text output (stdout/stderr only).
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `model_routes::model = "trace"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Text
}

fn default_output() -> LogOutput {
    LogOutput::Stderr
}

fn default_log_file() -> PathBuf {
    PathBuf::from("model-routes.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(format!("Invalid log level: {}", self.level));
        }
        if self.output == LogOutput::File && self.file.as_os_str().is_empty() {
            return Err("Log file path cannot be empty when output is 'file'".to_string());
        }
        for (module, level) in &self.modules {
            if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(format!("Invalid log level for {}: {}", module, level));
            }
        }
        Ok(())
    }
}

/// Install the global subscriber described by `config`.
///
/// Precedence, highest first: environment variables (`MODEL_ROUTES_LOG`,
/// `MODEL_ROUTES_LOG_FORMAT`, `MODEL_ROUTES_LOG_OUTPUT`), then `config`.
/// A disabled config installs nothing.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = match std::env::var(LOG_FORMAT_ENV) {
        Ok(value) => LogFormat::parse(&value)?,
        Err(_) => config.format,
    };
    let output = match std::env::var(LOG_OUTPUT_ENV) {
        Ok(value) => LogOutput::parse(&value)?,
        Err(_) => config.output,
    };
    let ansi = config.color && output != LogOutput::File;
    let registry = Registry::default().with(filter);

    let result = match (format, output) {
        (LogFormat::Json, LogOutput::File) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(open_log_file(config)?),
            )
            .try_init(),
        (LogFormat::Json, LogOutput::Stdout) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Json, LogOutput::Stderr) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (LogFormat::Text, LogOutput::File) => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(open_log_file(config)?),
            )
            .try_init(),
        (LogFormat::Text, LogOutput::Stdout) => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Text, LogOutput::Stderr) => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.map_err(|e| AppError::Logging(format!("Failed to install subscriber: {}", e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, AppError> {
    if let Some(parent) = config.file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Logging(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| AppError::Logging(format!("Failed to open log file {:?}: {}", config.file, e)))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, level) in &config.modules {
        let directive = format!("{}={}", module, level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| AppError::Logging(format!("Invalid log directive {}: {}", directive, e)))?,
        );
    }
    Ok(filter)
}
