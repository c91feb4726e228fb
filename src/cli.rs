//! CLI domain: parse, route, and output only.
//! Single route table dispatches to library operations.

mod output;
mod parse;
mod route;

pub use output::{format_plan, format_records, map_error};
pub use parse::{Cli, Commands};
pub use route::{read_survey, RunContext};
