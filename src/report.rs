//! CI outputs and human-readable summaries.
//!
//! Outputs go to the file named by `GITHUB_OUTPUT` using the multi-line
//! delimiter syntax. Outside GitHub Actions they are printed to stdout as
//! `name=value` with newlines escaped as `%0A`.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;
use uuid::Uuid;

use crate::lint::LintOutcome;
use crate::ports::filesystem::FileSystem;
use crate::resolve::MatchResult;

/// Environment variable naming the GitHub Actions output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Output holding the JSON array of affected APIs.
pub const API_CHANGES_OUTPUT: &str = "api-changes";
/// Output holding `"true"` or `"false"`.
pub const HAS_CHANGES_OUTPUT: &str = "has-changes";
/// Output holding the JSON array of lint outcomes.
pub const LINT_RESULTS_OUTPUT: &str = "lint-results";

/// How the human-readable summary is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Collapsible `::group::` blocks for the Actions log.
    #[default]
    Github,
    /// Pretty-printed JSON.
    Json,
}

/// Errors writing outputs.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A value could not be serialized.
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        /// Output name.
        name: &'static str,
        /// Serializer error.
        source: serde_json::Error,
    },

    /// The output file could not be written.
    #[error("failed to write output {name} to {path}: {source}")]
    Write {
        /// Output name.
        name: &'static str,
        /// Output file.
        path: PathBuf,
        /// Underlying filesystem error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Where outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Append to a GitHub Actions output file.
    File(PathBuf),
    /// Print to stdout.
    Stdout,
}

impl OutputSink {
    /// `File` when `github_output` is set and non-empty, else `Stdout`.
    #[must_use]
    pub fn from_env_value(github_output: Option<String>) -> Self {
        match github_output.filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Stdout,
        }
    }
}

/// Writes named outputs to a sink.
pub struct Reporter<'a> {
    fs: &'a dyn FileSystem,
    sink: OutputSink,
}

impl<'a> Reporter<'a> {
    /// Create a reporter writing to `sink`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, sink: OutputSink) -> Self {
        Self { fs, sink }
    }

    /// Set one output.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Write`] if the output file cannot be appended.
    pub fn set_output(&self, name: &'static str, value: &str) -> Result<(), ReportError> {
        match &self.sink {
            OutputSink::File(path) => {
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                self.fs
                    .append(path, &file_command(name, value, &delimiter))
                    .map_err(|source| ReportError::Write { name, path: path.clone(), source })
            }
            OutputSink::Stdout => {
                println!("{}", stdout_command(name, value));
                Ok(())
            }
        }
    }

    /// Set `api-changes` and `has-changes`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if serialization or writing fails.
    pub fn set_changes(&self, results: &[MatchResult]) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(results)
            .map_err(|source| ReportError::Serialize { name: API_CHANGES_OUTPUT, source })?;
        self.set_output(API_CHANGES_OUTPUT, &json)?;
        self.set_output(HAS_CHANGES_OUTPUT, if results.is_empty() { "false" } else { "true" })
    }

    /// Set `lint-results`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if serialization or writing fails.
    pub fn set_lint_results(&self, outcomes: &[LintOutcome]) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(outcomes)
            .map_err(|source| ReportError::Serialize { name: LINT_RESULTS_OUTPUT, source })?;
        self.set_output(LINT_RESULTS_OUTPUT, &json)
    }
}

/// `name<<delimiter` / value / `delimiter`, as Actions expects for
/// multi-line values.
fn file_command(name: &str, value: &str, delimiter: &str) -> String {
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn stdout_command(name: &str, value: &str) -> String {
    format!("{name}={}", escape_command_data(value))
}

/// Escape `%`, CR and LF so a multi-line value survives as one workflow
/// command line.
#[must_use]
pub fn escape_command_data(value: &str) -> String {
    value.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// An `::error::` annotation carrying `message` on a single line.
#[must_use]
pub fn error_annotation(message: &str) -> String {
    format!("::error::{}", escape_command_data(message))
}

/// Render the affected-API summary.
#[must_use]
pub fn render_changes(results: &[MatchResult], format: OutputFormat) -> String {
    if results.is_empty() {
        return "No API file changes found".to_string();
    }

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(results).unwrap_or_default(),
        OutputFormat::Github => {
            let mut out = format!("Found {} affected API(s)\n", results.len());
            out.push_str("::group::API Changes Found\n");
            for result in results {
                let _ = writeln!(
                    out,
                    "{} (root: {}, integration: {})",
                    result.api_id,
                    result.root_file.as_deref().unwrap_or("none"),
                    result.integration_id.as_deref().unwrap_or("none"),
                );
                for file in &result.changed_files {
                    let _ = writeln!(out, "  {file}");
                }
            }
            out.push_str("::endgroup::");
            out
        }
    }
}

/// Render lint outcomes, one group per API.
#[must_use]
pub fn render_lint(outcomes: &[LintOutcome], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcomes).unwrap_or_default(),
        OutputFormat::Github => {
            let mut out = String::new();
            for outcome in outcomes {
                let status = if outcome.success { "passed" } else { "failed" };
                let _ = writeln!(out, "::group::Lint {} ({status})", outcome.api_id);
                if !outcome.output.is_empty() {
                    let _ = writeln!(out, "{}", outcome.output);
                }
                out.push_str("::endgroup::\n");
                if !outcome.success {
                    let _ = writeln!(out, "::error::Linting failed for API {}", outcome.api_id);
                }
            }
            out.trim_end().to_string()
        }
    }
}
