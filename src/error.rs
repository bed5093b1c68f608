//! Run-level error type.

use thiserror::Error;

use crate::lint::LintError;
use crate::report::ReportError;

/// Everything that makes a run fail.
///
/// Recoverable absences (missing directory, missing mapping, an unreadable
/// definition file, a failed diff) never surface here; they are logged and
/// the run continues.
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line arguments were rejected, or help/version was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// `--lint` was given without an API key.
    #[error("linting requested but POSTMAN_API_KEY is not set")]
    MissingCredential,

    /// The lint phase could not start.
    #[error(transparent)]
    Lint(#[from] LintError),

    /// At least one API failed linting.
    #[error("{failed} of {total} API(s) failed linting")]
    LintFailures {
        /// Number of failed APIs.
        failed: usize,
        /// Number of linted APIs.
        total: usize,
    },

    /// Outputs could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    /// A replay cassette could not be loaded.
    #[error("{0}")]
    Cassette(String),
}
