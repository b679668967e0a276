//! CLI parse: clap types for model-routes. No behavior; definitions only.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// model-routes - expand model declarations into route tables
#[derive(Parser, Debug)]
#[command(name = "model-routes")]
#[command(about = "Expand model-centric route declarations into namespaced resource routes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a route document and print the route table
    Draw {
        /// Route document (TOML, or JSON with a .json extension)
        file: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Omit the column header
        #[arg(long)]
        no_header: bool,
    },
    /// Validate a route document and report how many routes it draws
    Check {
        file: PathBuf,
    },
    /// Show the inflections used for a model identifier
    Inflect {
        /// Model identifier, e.g. Projects::Deliverable
        word: String,
    },
}
