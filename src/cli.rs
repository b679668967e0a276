//! CLI domain: parse, route, output, and presentation only.
//! A single route table dispatches each command to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_check_summary, format_inflections, format_routes};
pub use route::RunContext;
