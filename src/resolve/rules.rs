//! Path-equivalence rules between a changed file and a declared path.
//!
//! Each rule is a standalone predicate; [`super::PathMatcher`] ORs them.

use std::path::{Component, Path, PathBuf};

/// The rule that established a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Byte-for-byte equal strings.
    Exact,
    /// The changed path ends with `/` followed by the declared path.
    Suffix,
    /// Both paths resolve to the same absolute location.
    Resolved,
}

/// `src/a.ts` == `src/a.ts`.
#[must_use]
pub fn exact_match(changed: &str, declared: &str) -> bool {
    changed == declared
}

/// `repo/src/a.ts` ends with `/src/a.ts`.
#[must_use]
pub fn suffix_match(changed: &str, declared: &str) -> bool {
    changed.strip_suffix(declared).is_some_and(|head| head.ends_with('/'))
}

/// `./src/a.ts` and `src/a.ts` resolve to the same file under `base`.
#[must_use]
pub fn resolved_match(base: &Path, changed: &str, declared: &str) -> bool {
    resolve(base, changed) == resolve(base, declared)
}

/// Lexically resolve `path` against `base`: absolute paths replace the
/// base, `.` is dropped and `..` pops (never above the root). Symlinks are
/// not followed and the filesystem is not consulted.
#[must_use]
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                resolved.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if resolved.parent().is_some() {
                    resolved.pop();
                }
            }
        }
    }
    resolved
}
