//! `apiwatch find` command: the full change-detection pipeline.

use tracing::{debug, info};

use crate::catalog::load_catalog;
use crate::changes::changed_files;
use crate::config::RunConfig;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::lint::{failure_count, LintOutcome, LintRunner};
use crate::mapping::IntegrationMapping;
use crate::report::{render_changes, render_lint, Reporter};
use crate::resolve::{resolve, MatchResult, PathMatcher};

/// What a `find` run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindReport {
    /// Affected APIs, in catalog order.
    pub results: Vec<MatchResult>,
    /// Lint outcomes, when linting ran.
    pub lint: Option<Vec<LintOutcome>>,
}

/// Execute the `find` command.
///
/// Loads the change set, catalog and mapping, resolves affected APIs,
/// writes the CI outputs and, if configured, lints each affected API.
///
/// # Errors
///
/// Returns an error if outputs cannot be written, the lint tool cannot log
/// in, or any API fails linting.
pub fn run(ctx: &ServiceContext, config: &RunConfig) -> Result<FindReport, Error> {
    info!(dir = %config.postman_dir.display(), "searching for API changes");
    info!(base_ref = %config.base_ref, "comparing against base reference");

    let changes = changed_files(ctx.git.as_ref(), &config.base_ref);
    let catalog = load_catalog(ctx.fs.as_ref(), &config.postman_dir);
    info!("found {} changed files", changes.len());
    info!("found {} API definitions", catalog.len());

    let mapping = IntegrationMapping::load(ctx.fs.as_ref(), &config.mapping_path);
    let matcher = PathMatcher::new(config.working_dir.clone());
    let results = resolve(&changes, &catalog, &mapping, &matcher);
    for result in &results {
        debug!(api_id = %result.api_id, files = ?result.changed_files, "API affected");
    }

    let reporter = Reporter::new(ctx.fs.as_ref(), config.sink.clone());
    reporter.set_changes(&results)?;
    println!("{}", render_changes(&results, config.output_format));

    let Some(lint) = &config.lint else {
        return Ok(FindReport { results, lint: None });
    };
    if results.is_empty() {
        info!("no affected APIs; skipping lint");
        return Ok(FindReport { results, lint: None });
    }

    let runner = LintRunner::new(ctx.shell.as_ref(), lint.tool.clone(), lint.credential.clone());
    let outcomes = runner.lint_all(&results)?;
    reporter.set_lint_results(&outcomes)?;
    if !outcomes.is_empty() {
        println!("{}", render_lint(&outcomes, config.output_format));
    }

    let failed = failure_count(&outcomes);
    if failed > 0 {
        return Err(Error::LintFailures { failed, total: outcomes.len() });
    }
    info!("all {} affected API(s) passed linting", outcomes.len());
    Ok(FindReport { results, lint: Some(outcomes) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::config::LintConfig;
    use crate::lint::Credential;
    use crate::report::{OutputFormat, OutputSink};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::path::{Path, PathBuf};

    fn interaction(seq: u64, port: &str, method: &str, output: Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn shell_output(exit_code: i32, stdout: &str, stderr: &str) -> Value {
        json!({"ok": {"exit_code": exit_code, "stdout": stdout, "stderr": stderr}})
    }

    fn context(interactions: Vec<Interaction>) -> ServiceContext {
        ServiceContext::replaying_cassette(&Cassette {
            name: "find".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        })
    }

    fn workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join(".postman")).unwrap();
        std::fs::write(
            dir.join(".postman/api_a1"),
            "[config]\nid = A1\n\n[config.relations.apiDefinition]\n\
             files[] = {\"path\":\"spec/a.yaml\",\"metaData\":{}}\n\n\
             [config.relations.apiDefinition.metaData]\nrootFiles[] = spec/a.yaml\n",
        )
        .unwrap();
        std::fs::write(dir.join("integration-ids.csv"), "api-id,integration-id\nA1,999\n").unwrap();
        dir
    }

    fn config(dir: &Path, lint: Option<LintConfig>) -> RunConfig {
        RunConfig {
            postman_dir: dir.join(".postman"),
            base_ref: "HEAD~1".into(),
            output_format: OutputFormat::Json,
            mapping_path: dir.join("integration-ids.csv"),
            lint,
            sink: OutputSink::File(dir.join("github_output")),
            working_dir: dir.to_path_buf(),
        }
    }

    fn lint_config() -> Option<LintConfig> {
        Some(LintConfig { tool: "postman".into(), credential: Credential::new("PMAK-x").unwrap() })
    }

    #[test]
    fn find_reports_affected_api_with_integration_id() {
        let dir = workspace("apiwatch_find_basic");
        let ctx = context(vec![interaction(
            0,
            "git",
            "changed_paths",
            json!({"ok": ["spec/a.yaml", "spec/b.yaml"]}),
        )]);

        let report = run(&ctx, &config(&dir, None)).unwrap();
        assert_eq!(
            report.results,
            vec![MatchResult {
                api_id: "A1".into(),
                root_file: Some("spec/a.yaml".into()),
                changed_files: vec!["spec/a.yaml".into()],
                integration_id: Some("999".into()),
            }]
        );
        assert!(report.lint.is_none());

        let outputs = std::fs::read_to_string(dir.join("github_output")).unwrap();
        assert!(outputs.contains("\"integrationId\": \"999\""));
        assert!(outputs.contains("has-changes<<"));
        assert!(!outputs.contains("lint-results"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn find_with_no_changes_succeeds() {
        let dir = workspace("apiwatch_find_empty");
        let ctx = context(vec![
            interaction(0, "git", "changed_paths", json!({"err": "bad revision"})),
            interaction(1, "git", "changed_paths", json!({"err": "not a git repository"})),
        ]);

        let report = run(&ctx, &config(&dir, None)).unwrap();
        assert!(report.results.is_empty());
        let outputs = std::fs::read_to_string(dir.join("github_output")).unwrap();
        assert!(outputs.contains("\nfalse\n"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn find_with_lint_and_no_matches_never_logs_in() {
        let dir = workspace("apiwatch_find_lint_no_matches");
        let ctx = context(vec![
            interaction(0, "git", "changed_paths", json!({"ok": ["README.md"]})),
            interaction(1, "shell", "run", shell_output(1, "", "network down")),
        ]);

        let report = run(&ctx, &config(&dir, lint_config())).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.lint, None);
        let outputs = std::fs::read_to_string(dir.join("github_output")).unwrap();
        assert!(!outputs.contains("lint-results<<"));
        // The recorded login is still queued.
        assert_eq!(ctx.shell.run("postman login", &[]).unwrap().exit_code, 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn find_lints_each_affected_api() {
        let dir = workspace("apiwatch_find_lint_ok");
        let ctx = context(vec![
            interaction(0, "git", "changed_paths", json!({"ok": ["spec/a.yaml"]})),
            interaction(1, "shell", "run", shell_output(0, "", "")),
            interaction(2, "shell", "run", shell_output(0, "clean", "")),
        ]);

        let report = run(&ctx, &config(&dir, lint_config())).unwrap();
        let outcomes = report.lint.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].output, "clean");

        let outputs = std::fs::read_to_string(dir.join("github_output")).unwrap();
        assert!(outputs.contains("lint-results<<"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn find_fails_when_an_api_fails_linting() {
        let dir = workspace("apiwatch_find_lint_fail");
        let ctx = context(vec![
            interaction(0, "git", "changed_paths", json!({"ok": ["./spec/a.yaml"]})),
            interaction(1, "shell", "run", shell_output(0, "", "")),
            interaction(2, "shell", "run", shell_output(1, "", "3 errors")),
        ]);

        let err = run(&ctx, &config(&dir, lint_config())).unwrap_err();
        assert!(matches!(err, Error::LintFailures { failed: 1, total: 1 }));

        let outputs = std::fs::read_to_string(dir.join("github_output")).unwrap();
        assert!(outputs.contains("\"success\": false"));
        assert!(outputs.contains("3 errors"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
