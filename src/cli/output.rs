//! CLI output: error mapping from library errors to the CLI surface.

use crate::error::AppError;

/// Map an error to the line printed on stderr.
pub fn map_error(e: &AppError) -> String {
    match e {
        AppError::Route(route) => format!("Routing failed: {}", route),
        other => other.to_string(),
    }
}
