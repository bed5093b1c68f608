//! Change set: the files modified in the commit range under evaluation.

use tracing::{error, warn};

use crate::ports::git::GitRepo;

/// Default base reference: the previous commit.
pub const DEFAULT_BASE_REF: &str = "HEAD~1";

/// Files changed between `base_ref` and `HEAD`.
///
/// If that diff fails (shallow clone, unknown ref), falls back to the
/// working-tree diff against `HEAD`. If both fail the change set is empty.
#[must_use]
pub fn changed_files(git: &dyn GitRepo, base_ref: &str) -> Vec<String> {
    let paths = match git.changed_paths(Some(base_ref)) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(base_ref, "error getting changed files: {e}");
            match git.changed_paths(None) {
                Ok(paths) => paths,
                Err(e) => {
                    error!("fallback diff failed: {e}");
                    return Vec::new();
                }
            }
        }
    };
    paths.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingGitRepo;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use chrono::Utc;
    use serde_json::{json, Value};

    /// One interaction per `(recorded base, output)` pair.
    fn git_with(calls: Vec<(Value, Value)>) -> ReplayingGitRepo {
        let interactions = calls
            .into_iter()
            .zip(0..)
            .map(|((base, output), seq)| Interaction {
                seq,
                port: "git".into(),
                method: "changed_paths".into(),
                input: json!({ "base": base }),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "changes".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        ReplayingGitRepo::new(CassetteReplayer::new(&cassette))
    }

    #[test]
    fn uses_range_diff_when_available() {
        let git =
            git_with(vec![(json!("HEAD~1"), json!({"ok": ["spec/a.yaml", "", "README.md"]}))]);
        assert_eq!(changed_files(&git, "HEAD~1"), vec!["spec/a.yaml", "README.md"]);
    }

    #[test]
    fn falls_back_to_working_tree_diff() {
        let git = git_with(vec![
            (json!("HEAD~1"), json!({"err": "fatal: ambiguous argument 'HEAD~1'"})),
            (Value::Null, json!({"ok": ["spec/b.yaml"]})),
        ]);
        assert_eq!(changed_files(&git, "HEAD~1"), vec!["spec/b.yaml"]);
    }

    #[test]
    fn total_failure_is_empty() {
        let git = git_with(vec![
            (json!("main"), json!({"err": "not a git repository"})),
            (Value::Null, json!({"err": "same"})),
        ]);
        assert!(changed_files(&git, "main").is_empty());
    }
}
