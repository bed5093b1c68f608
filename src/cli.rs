//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::DEFAULT_POSTMAN_DIR;
use crate::changes::DEFAULT_BASE_REF;
use crate::lint::DEFAULT_LINT_TOOL;
use crate::mapping::DEFAULT_MAPPING_PATH;
use crate::report::OutputFormat;

/// Top-level CLI parser for `apiwatch`.
#[derive(Debug, Parser)]
#[command(name = "apiwatch", version, about = "Find Postman APIs touched by a commit range")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report APIs whose definition files changed, and optionally lint them.
    Find(FindArgs),
    /// Print the API catalog loaded from the definition directory as JSON.
    Catalog {
        /// Directory holding the `api_*` definition files.
        #[arg(long, default_value = DEFAULT_POSTMAN_DIR)]
        postman_dir: PathBuf,
    },
}

/// Arguments for `apiwatch find`.
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Directory holding the `api_*` definition files.
    #[arg(long, default_value = DEFAULT_POSTMAN_DIR)]
    pub postman_dir: PathBuf,

    /// Git reference to diff against `HEAD`.
    #[arg(long, default_value = DEFAULT_BASE_REF)]
    pub base_ref: String,

    /// Summary format written to the log.
    #[arg(long, value_enum, default_value_t = OutputFormat::Github)]
    pub output_format: OutputFormat,

    /// CSV mapping API ids to integration ids.
    #[arg(long, default_value = DEFAULT_MAPPING_PATH)]
    pub integration_ids: PathBuf,

    /// Lint every affected API (requires `POSTMAN_API_KEY`).
    #[arg(long)]
    pub lint: bool,

    /// Lint tool executable.
    #[arg(long, default_value = DEFAULT_LINT_TOOL)]
    pub lint_tool: String,
}
