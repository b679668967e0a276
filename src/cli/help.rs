//! Command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name used in log events (e.g. "draw").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Draw { .. } => "draw",
        Commands::Check { .. } => "check",
        Commands::Inflect { .. } => "inflect",
    }
}
