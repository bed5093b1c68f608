//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::replaying::{ReplayingGitRepo, ReplayingShellExecutor};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying).
pub struct ServiceContext {
    /// Filesystem for definition files, the mapping CSV and CI outputs.
    pub fs: Box<dyn FileSystem>,
    /// Git repository for the change set.
    pub git: Box<dyn GitRepo>,
    /// Shell executor for the lint tool.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            shell: Box::new(LiveShellExecutor),
        }
    }

    /// Creates a context whose git and shell ports replay a cassette.
    ///
    /// The filesystem stays live so definition files and outputs can be
    /// laid out in a temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        // Separate replayers so each port keeps its own queue.
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(cassette))),
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(cassette))),
        }
    }
}
