//! Run configuration assembled from flags and the process environment.

use std::path::PathBuf;

use crate::cli::FindArgs;
use crate::error::Error;
use crate::lint::{Credential, API_KEY_ENV};
use crate::report::{OutputFormat, OutputSink, GITHUB_OUTPUT_ENV};

/// Settings for the optional lint phase.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Lint tool executable.
    pub tool: String,
    /// API key handed to the tool.
    pub credential: Credential,
}

/// Everything one `find` run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the `api_*` definition files.
    pub postman_dir: PathBuf,
    /// Base reference for the diff.
    pub base_ref: String,
    /// Summary format.
    pub output_format: OutputFormat,
    /// Integration id CSV.
    pub mapping_path: PathBuf,
    /// Present when linting was requested.
    pub lint: Option<LintConfig>,
    /// Where CI outputs go.
    pub sink: OutputSink,
    /// Base directory for resolving relative paths.
    pub working_dir: PathBuf,
}

impl RunConfig {
    /// Build the configuration. `env` looks up environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when `--lint` is set and no
    /// non-blank API key is available.
    pub fn from_args(
        args: &FindArgs,
        env: impl Fn(&str) -> Option<String>,
        working_dir: PathBuf,
    ) -> Result<Self, Error> {
        let lint = if args.lint {
            let credential =
                env(API_KEY_ENV).and_then(Credential::new).ok_or(Error::MissingCredential)?;
            Some(LintConfig { tool: args.lint_tool.clone(), credential })
        } else {
            None
        };

        Ok(Self {
            postman_dir: args.postman_dir.clone(),
            base_ref: args.base_ref.clone(),
            output_format: args.output_format,
            mapping_path: args.integration_ids.clone(),
            lint,
            sink: OutputSink::from_env_value(env(GITHUB_OUTPUT_ENV)),
            working_dir,
        })
    }
}
