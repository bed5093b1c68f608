//! Replaying adapter for the `ShellExecutor` port.
//!
//! When an interaction records `input.command`, the replayed call must
//! issue exactly that command line. Environment values are never recorded,
//! so the API key cannot leak into a cassette.

use std::sync::Mutex;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Replays recorded lint-tool invocations from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(
        &self,
        command: &str,
        _envs: &[(&str, &str)],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let interaction =
            self.replayer.lock().expect("replayer lock poisoned").next_interaction("shell", "run");
        if let Some(recorded) = interaction.input.get("command").and_then(serde_json::Value::as_str) {
            if recorded != command {
                return Err(format!(
                    "shell::run: cassette seq {} recorded `{recorded}`, got `{command}`",
                    interaction.seq
                )
                .into());
            }
        }
        extract_result(&interaction.output, "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replaying_shell_run() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "shell".into(),
            method: "run".into(),
            input: json!({"command": "postman api lint A1"}),
            output: json!({"ok": {"exit_code": 0, "stdout": "No issues\n", "stderr": ""}}),
        }]);
        let shell = ReplayingShellExecutor::new(replayer);
        let result = shell.run("postman api lint A1", &[]).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "No issues\n");
    }

    #[test]
    fn replaying_shell_run_error() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "shell".into(),
            method: "run".into(),
            input: json!({"command": "bad_cmd"}),
            output: json!({"err": "command not found"}),
        }]);
        let shell = ReplayingShellExecutor::new(replayer);
        let result = shell.run("bad_cmd", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn replaying_shell_rejects_different_command() {
        let replayer = make_replayer(vec![Interaction {
            seq: 3,
            port: "shell".into(),
            method: "run".into(),
            input: json!({"command": "postman api lint A1"}),
            output: json!({"ok": {"exit_code": 0, "stdout": "", "stderr": ""}}),
        }]);
        let shell = ReplayingShellExecutor::new(replayer);
        let err = shell.run("postman api lint B2", &[]).unwrap_err();
        assert!(err.to_string().contains("seq 3 recorded `postman api lint A1`"));
    }
}
