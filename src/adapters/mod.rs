//! Adapter implementations for the port traits.
//!
//! `live` talks to the real filesystem, git and shell; `replaying` serves
//! recorded interactions from a cassette for deterministic tests.

pub mod live;
pub mod replaying;
