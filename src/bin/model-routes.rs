//! model-routes CLI Binary
//!
//! Draws route documents and prints the resulting route tables.

use clap::Parser;
use model_routes::cli::{map_error, Cli, RunContext};
use model_routes::config::ConfigLoader;
use model_routes::error::AppError;
use model_routes::logging::{init_logging, LogFormat, LogOutput, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = match build_logging_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(2);
        }
    };
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("model-routes starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
/// Environment overrides are applied later by `init_logging`.
fn build_logging_config(cli: &Cli) -> Result<LoggingConfig, AppError> {
    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    };
    // Configuration errors are reported by RunContext::new.
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(level) = &cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.format = LogFormat::parse(format)?;
    }
    if let Some(output) = &cli.log_output {
        config.output = LogOutput::parse(output)?;
    }
    if cli.quiet {
        config.enabled = false;
    }
    Ok(config)
}
