//! Command-line interface
//!
//! One-shot subcommands over a database file: open, perform a single
//! operation, print a JSON result, close. All document and partial
//! arguments are JSON objects; filters use the textual
//! `field=value,...` syntax.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
