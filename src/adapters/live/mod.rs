//! Live adapters that talk to real external systems.

pub mod filesystem;
pub mod git;
pub mod shell;
