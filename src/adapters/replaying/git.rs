//! Replaying adapter for the `GitRepo` port.
//!
//! When an interaction records `input.base` (a ref, or `null` for the
//! working-tree diff), the replayed call must ask for that same base.

use std::sync::Mutex;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::GitRepo;

/// Replays recorded git operations from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn changed_paths(
        &self,
        base: Option<&str>,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let interaction = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_interaction("git", "changed_paths");
        if let Some(recorded) = interaction.input.get("base") {
            let recorded = recorded.as_str();
            if recorded != base {
                return Err(format!(
                    "git::changed_paths: cassette seq {} recorded base {recorded:?}, got {base:?}",
                    interaction.seq
                )
                .into());
            }
        }
        extract_result(&interaction.output, "git::changed_paths")
    }
}
