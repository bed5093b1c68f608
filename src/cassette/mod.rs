//! Cassettes: recorded port interactions replayed in tests.

pub mod format;
pub mod replayer;
