//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (filesystem, git, shell). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod git;
pub mod shell;

pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use shell::{ShellExecutor, ShellOutput};
