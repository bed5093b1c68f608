//! Command dispatch and handlers.

pub mod catalog;
pub mod find;

use std::env;
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::RunConfig;
use crate::context::ServiceContext;
use crate::error::Error;

/// Environment variable naming a cassette to replay git and shell from.
pub const CASSETTE_ENV: &str = "APIWATCH_CASSETTE";

/// Dispatch a parsed command to its handler.
///
/// When `APIWATCH_CASSETTE` is set to a cassette file, git and shell
/// interactions are replayed from it instead of run for real.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), Error> {
    let ctx = match env::var(CASSETTE_ENV) {
        Ok(path) if !path.is_empty() => {
            ServiceContext::replaying(&PathBuf::from(path)).map_err(Error::Cassette)?
        }
        _ => ServiceContext::live(),
    };
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), Error> {
    match command {
        Command::Find(args) => {
            let working_dir = env::current_dir().map_err(Error::WorkingDir)?;
            let config = RunConfig::from_args(args, |name| env::var(name).ok(), working_dir)?;
            find::run(ctx, &config).map(|_| ())
        }
        Command::Catalog { postman_dir } => catalog::run(ctx, postman_dir),
    }
}
