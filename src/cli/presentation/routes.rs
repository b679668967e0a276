//! Route table and document check output.

use super::section_title;
use crate::config::OutputFormat;
use crate::error::AppError;
use crate::mapper::RouteSet;
use std::path::Path;

pub fn format_routes(routes: &RouteSet, format: OutputFormat, header: bool) -> Result<String, AppError> {
    match format {
        OutputFormat::Sheet => Ok(routes.format_sheet(header)),
        OutputFormat::Table => Ok(routes.format_table()),
        OutputFormat::Json => Ok(routes.to_json()?),
    }
}

pub fn format_check_summary(path: &Path, routes: &RouteSet) -> String {
    let named = routes.names().len();
    let mut lines = vec![
        section_title("Route document"),
        format!("  File: {}", path.display()),
        format!("  Routes: {}", routes.len()),
        format!("  Named helpers: {}", named),
    ];
    let unnamed = routes.len() - named;
    if unnamed > 0 {
        lines.push(format!("  Routes without a helper name: {}", unnamed));
    }
    lines.join("\n")
}
