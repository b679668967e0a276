//! CLI presentation: text and json formatters per command.

mod inflect;
mod routes;

use owo_colors::OwoColorize;

pub use inflect::format_inflections;
pub use routes::{format_check_summary, format_routes};

fn section_title(title: &str) -> String {
    format!("{}", title.bold().underline())
}
