//! Core library entry for the `apiwatch` CLI.
//!
//! `apiwatch` works out which Postman API definitions a commit range
//! touched: it diffs the range, reads the `api_*` definition files under
//! `.postman/`, matches changed files against each API's declared files,
//! and reports the affected APIs (optionally linting each one).

pub mod adapters;
pub mod cassette;
pub mod catalog;
pub mod changes;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod lint;
pub mod mapping;
pub mod ports;
pub mod report;
pub mod resolve;

use clap::Parser;

pub use error::Error;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`Error::Cli`] when argument parsing fails (including help and
/// version requests), or the command's own error.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli.command)
}
