//! `inflect` command output.

use super::section_title;
use crate::error::AppError;
use crate::inflect::Inflector;

pub fn format_inflections(word: &str, inflector: &dyn Inflector) -> Result<String, AppError> {
    let path = inflector.underscore_path(word)?;
    let model_name = path.last().map(String::as_str).unwrap_or_default();
    let lines = [
        section_title(word),
        format!("  Path:     {}", path.join("/")),
        format!("  Singular: {}", inflector.singularize(model_name)),
        format!("  Plural:   {}", inflector.pluralize(model_name)),
    ];
    Ok(lines.join("\n"))
}
