//! Optional lint phase: run the Postman CLI against each affected API.
//!
//! The API key is handed in by the caller as a [`Credential`] and reaches
//! the child process through its environment only.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::ports::shell::ShellExecutor;
use crate::resolve::MatchResult;

/// Environment variable holding the Postman API key.
pub const API_KEY_ENV: &str = "POSTMAN_API_KEY";

/// Default lint tool executable.
pub const DEFAULT_LINT_TOOL: &str = "postman";

/// A secret API key. `Debug` output is redacted.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key; blank keys are rejected.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Result of linting one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintOutcome {
    /// API that was linted.
    pub api_id: String,
    /// Integration id passed to the tool, if any.
    pub integration_id: Option<String>,
    /// Whether the tool reported success.
    pub success: bool,
    /// Captured tool output (stdout then stderr), or the spawn error.
    pub output: String,
}

/// Failures that stop the lint phase before any API is linted.
#[derive(Debug, Error)]
pub enum LintError {
    /// Authenticating the lint tool failed.
    #[error("`{tool} login` failed: {detail}")]
    Login {
        /// Tool that was invoked.
        tool: String,
        /// Exit status and output, or the spawn error.
        detail: String,
    },
}

/// Drives the lint tool once per affected API.
pub struct LintRunner<'a> {
    shell: &'a dyn ShellExecutor,
    tool: String,
    credential: Credential,
}

impl<'a> LintRunner<'a> {
    /// Create a runner invoking `tool` through `shell`.
    #[must_use]
    pub fn new(
        shell: &'a dyn ShellExecutor,
        tool: impl Into<String>,
        credential: Credential,
    ) -> Self {
        Self { shell, tool: tool.into(), credential }
    }

    fn envs(&self) -> [(&str, &str); 1] {
        [(API_KEY_ENV, self.credential.expose())]
    }

    /// Authenticate the tool with the API key.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Login`] if the command cannot be spawned or
    /// exits non-zero.
    pub fn login(&self) -> Result<(), LintError> {
        let command = format!("{} login --with-api-key \"${API_KEY_ENV}\"", self.tool);
        let detail = match self.shell.run(&command, &self.envs()) {
            Ok(output) if output.success() => return Ok(()),
            Ok(output) => format!("exit code {}: {}", output.exit_code, output.combined()),
            Err(e) => e.to_string(),
        };
        Err(LintError::Login { tool: self.tool.clone(), detail })
    }

    /// The lint command line for one API.
    #[must_use]
    pub fn lint_command(&self, result: &MatchResult) -> String {
        let mut command = format!("{} api lint {}", self.tool, shell_quote(&result.api_id));
        if let Some(id) = &result.integration_id {
            command.push_str(" --integration-id ");
            command.push_str(&shell_quote(id));
        }
        command
    }

    /// Lint a single API. Failures are captured in the outcome.
    #[must_use]
    pub fn lint_one(&self, result: &MatchResult) -> LintOutcome {
        let command = self.lint_command(result);
        let (success, output) = match self.shell.run(&command, &self.envs()) {
            Ok(output) => (output.success(), output.combined()),
            Err(e) => (false, format!("failed to run `{command}`: {e}")),
        };

        if success {
            info!(api_id = %result.api_id, "lint passed");
        } else {
            error!(api_id = %result.api_id, "lint failed");
        }

        LintOutcome {
            api_id: result.api_id.clone(),
            integration_id: result.integration_id.clone(),
            success,
            output,
        }
    }

    /// Log in, then lint every API in order. One API failing does not stop
    /// the others.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Login`] if authentication fails; nothing is
    /// linted in that case.
    pub fn lint_all(&self, results: &[MatchResult]) -> Result<Vec<LintOutcome>, LintError> {
        self.login()?;
        Ok(results.iter().map(|result| self.lint_one(result)).collect())
    }
}

/// Number of failed outcomes.
#[must_use]
pub fn failure_count(outcomes: &[LintOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.success).count()
}

/// Quote a single shell word.
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || "-_./:@".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
