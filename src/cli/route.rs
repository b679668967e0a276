//! CLI route: run context and the single command table.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_check_summary, format_inflections, format_routes};
use crate::config::{ConfigLoader, RoutesConfig};
use crate::document::RouteDocument;
use crate::error::AppError;
use crate::inflect::{EnglishInflector, Inflector};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, loaded config, inflector.
pub struct RunContext {
    workspace_root: PathBuf,
    config: RoutesConfig,
    inflector: Rc<dyn Inflector>,
}

impl RunContext {
    /// Load and validate configuration for `workspace_root`, or from
    /// `config_path` when one is given.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::from_config(workspace_root, config)
    }

    pub fn from_config(workspace_root: PathBuf, config: RoutesConfig) -> Result<Self, AppError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        let inflector = Rc::new(EnglishInflector::with_config(&config.inflections)?);
        Ok(Self {
            workspace_root,
            config,
            inflector,
        })
    }

    pub fn config(&self) -> &RoutesConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, AppError> {
        let started = Instant::now();
        let result = match command {
            Commands::Draw {
                file,
                format,
                no_header,
            } => self.handle_draw(file, *format, *no_header),
            Commands::Check { file } => self.handle_check(file),
            Commands::Inflect { word } => format_inflections(word, self.inflector.as_ref()),
        };
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_draw(
        &self,
        file: &Path,
        format: Option<crate::config::OutputFormat>,
        no_header: bool,
    ) -> Result<String, AppError> {
        let routes = self.load_document(file)?.draw(Rc::clone(&self.inflector))?;
        let format = format.unwrap_or(self.config.output.format);
        let header = self.config.output.header && !no_header;
        format_routes(&routes, format, header)
    }

    fn handle_check(&self, file: &Path) -> Result<String, AppError> {
        let routes = self.load_document(file)?.draw(Rc::clone(&self.inflector))?;
        info!(file = %file.display(), routes = routes.len(), "Route document is valid");
        Ok(format_check_summary(file, &routes))
    }

    /// Relative document paths resolve against the workspace root.
    fn load_document(&self, file: &Path) -> Result<RouteDocument, AppError> {
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.workspace_root.join(file)
        };
        RouteDocument::load(&path)
    }
}
