//! Error types for route declaration and the surrounding tooling.

use thiserror::Error;

/// Errors raised while declaring routes.
///
/// Every variant aborts the draw pass: a partially built route table is
/// never handed back to the caller.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Invalid model name: {0:?}")]
    InvalidModelName(String),

    #[error(
        "Cannot eject {requested} namespace(s) for {model}: only {available} tracked namespace(s) are open"
    )]
    EjectionOverflow {
        model: String,
        requested: usize,
        available: usize,
    },

    #[error("Scope stack mismatch: {0}")]
    ScopeMismatch(String),

    #[error("Draw finished with undrained frames: {namespaces} namespace(s), {models} model(s)")]
    UndrainedFrames { namespaces: usize, models: usize },

    #[error("Can't use {0} outside a resources scope")]
    OutsideResourceScope(&'static str),

    #[error("Missing controller for route {0:?}")]
    MissingController(String),

    #[error("Invalid route target {0:?} (expected \"controller#action\")")]
    InvalidRouteTarget(String),

    #[error("No concern named {0:?} was declared")]
    UnknownConcern(String),
}

/// Errors surfaced by configuration, document loading, and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid route document {path}: {message}")]
    Document { path: String, message: String },

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
