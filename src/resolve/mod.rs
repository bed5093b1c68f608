//! Resolution engine: which APIs does a change set touch?
//!
//! Every changed file is compared with every declared path of every API
//! record. An API appears in the output only if at least one changed file
//! matched it; its changed files are deduplicated in first-seen order.

pub mod rules;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::ApiRecord;
use crate::mapping::IntegrationMapping;

pub use rules::MatchRule;

/// An affected API and the changed files that touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// API identifier from the definition record.
    pub api_id: String,
    /// First declared root file, if any.
    pub root_file: Option<String>,
    /// Changed files that matched, deduplicated, in change-set order.
    pub changed_files: Vec<String>,
    /// Integration id from the mapping, if any.
    pub integration_id: Option<String>,
}

/// Applies the path-equivalence rules relative to a fixed base directory.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    base: PathBuf,
}

impl PathMatcher {
    /// Create a matcher that resolves relative paths against `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The first rule under which `changed` and `declared` name the same file.
    #[must_use]
    pub fn matches(&self, changed: &str, declared: &str) -> Option<MatchRule> {
        if rules::exact_match(changed, declared) {
            Some(MatchRule::Exact)
        } else if rules::suffix_match(changed, declared) {
            Some(MatchRule::Suffix)
        } else if rules::resolved_match(&self.base, changed, declared) {
            Some(MatchRule::Resolved)
        } else {
            None
        }
    }
}

/// Changed files that match any of `record`'s declared paths, in
/// change-set order, each listed once.
#[must_use]
pub fn matched_files(
    changes: &[String],
    record: &ApiRecord,
    matcher: &PathMatcher,
) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for changed in changes {
        if matched.contains(changed) {
            continue;
        }
        let hit = record.declared_paths.iter().any(|d| matcher.matches(changed, d).is_some());
        if hit {
            matched.push(changed.clone());
        }
    }
    matched
}

/// Join a change set against the catalog.
///
/// Output order follows catalog order. An empty change set yields no
/// results without inspecting the catalog.
#[must_use]
pub fn resolve(
    changes: &[String],
    catalog: &[ApiRecord],
    mapping: &IntegrationMapping,
    matcher: &PathMatcher,
) -> Vec<MatchResult> {
    if changes.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter_map(|record| {
            let changed_files = matched_files(changes, record, matcher);
            if changed_files.is_empty() {
                return None;
            }
            Some(MatchResult {
                api_id: record.api_id.clone(),
                root_file: record.root_paths.first().cloned(),
                changed_files,
                integration_id: mapping.get(&record.api_id).map(str::to_string),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(api_id: &str, declared: &[&str], roots: &[&str]) -> ApiRecord {
        ApiRecord {
            api_id: api_id.into(),
            declared_paths: declared.iter().map(|s| (*s).to_string()).collect(),
            root_paths: roots.iter().map(|s| (*s).to_string()).collect(),
            source: PathBuf::from(format!(".postman/api_{api_id}")),
        }
    }

    fn changes(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|s| (*s).to_string()).collect()
    }

    fn matcher() -> PathMatcher {
        PathMatcher::new("/work/repo")
    }

    #[test]
    fn single_api_end_to_end() {
        let catalog = vec![record("A1", &["spec/a.yaml"], &["spec/a.yaml"])];
        let results = resolve(
            &changes(&["spec/a.yaml", "spec/b.yaml"]),
            &catalog,
            &IntegrationMapping::default(),
            &matcher(),
        );
        assert_eq!(
            results,
            vec![MatchResult {
                api_id: "A1".into(),
                root_file: Some("spec/a.yaml".into()),
                changed_files: vec!["spec/a.yaml".into()],
                integration_id: None,
            }]
        );
    }

    #[test]
    fn empty_change_set_yields_nothing() {
        let catalog = vec![record("A1", &["spec/a.yaml"], &[])];
        let results = resolve(&[], &catalog, &IntegrationMapping::default(), &matcher());
        assert!(results.is_empty());
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let results =
            resolve(&changes(&["spec/a.yaml"]), &[], &IntegrationMapping::default(), &matcher());
        assert!(results.is_empty());
    }

    #[test]
    fn unmatched_apis_are_omitted() {
        let catalog = vec![
            record("A1", &["spec/a.yaml"], &[]),
            record("B2", &["other/b.yaml"], &[]),
            record("C3", &[], &[]),
        ];
        let results = resolve(
            &changes(&["other/b.yaml"]),
            &catalog,
            &IntegrationMapping::default(),
            &matcher(),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].api_id, "B2");
        assert!(results.iter().all(|r| !r.changed_files.is_empty()));
    }

    #[test]
    fn file_matching_two_declared_paths_is_listed_once() {
        let catalog = vec![record("A1", &["spec/a.yaml", "./spec/a.yaml"], &[])];
        let results = resolve(
            &changes(&["spec/a.yaml", "spec/a.yaml"]),
            &catalog,
            &IntegrationMapping::default(),
            &matcher(),
        );
        assert_eq!(results[0].changed_files, vec!["spec/a.yaml"]);
    }

    #[test]
    fn each_rule_is_sufficient() {
        let m = matcher();
        assert_eq!(m.matches("src/a.ts", "src/a.ts"), Some(MatchRule::Exact));
        assert_eq!(m.matches("repo/src/a.ts", "src/a.ts"), Some(MatchRule::Suffix));
        assert_eq!(m.matches("./src/a.ts", "src/a.ts"), Some(MatchRule::Suffix));
        assert_eq!(m.matches("src/x/../a.ts", "src/a.ts"), Some(MatchRule::Resolved));
        assert_eq!(m.matches("/work/repo/src/a.ts", "./src/a.ts"), Some(MatchRule::Resolved));
        assert_eq!(m.matches("src/b.ts", "src/a.ts"), None);
    }

    #[test]
    fn preserves_catalog_and_change_order() {
        let catalog = vec![
            record("Z", &["z.yaml", "shared.yaml"], &[]),
            record("A", &["a.yaml", "shared.yaml"], &["a.yaml", "b.yaml"]),
        ];
        let results = resolve(
            &changes(&["shared.yaml", "a.yaml", "z.yaml"]),
            &catalog,
            &IntegrationMapping::default(),
            &matcher(),
        );
        let ids: Vec<&str> = results.iter().map(|r| r.api_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A"]);
        assert_eq!(results[0].changed_files, vec!["shared.yaml", "z.yaml"]);
        assert_eq!(results[1].changed_files, vec!["shared.yaml", "a.yaml"]);
        assert_eq!(results[1].root_file.as_deref(), Some("a.yaml"));
    }

    #[test]
    fn joins_integration_ids() {
        let catalog = vec![record("apiX", &["x.yaml"], &[]), record("apiY", &["y.yaml"], &[])];
        let mapping: IntegrationMapping = [("apiX", "999")].into_iter().collect();
        let results = resolve(&changes(&["x.yaml", "y.yaml"]), &catalog, &mapping, &matcher());
        assert_eq!(results[0].integration_id.as_deref(), Some("999"));
        assert_eq!(results[1].integration_id, None);
    }

    #[test]
    fn serializes_with_nulls() {
        let result = MatchResult {
            api_id: "A1".into(),
            root_file: None,
            changed_files: vec!["spec/a.yaml".into()],
            integration_id: None,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "apiId": "A1",
                "rootFile": null,
                "changedFiles": ["spec/a.yaml"],
                "integrationId": null
            })
        );
    }
}
