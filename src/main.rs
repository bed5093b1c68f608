//! Binary entrypoint for the `apiwatch` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`info` by default).
const LOG_ENV: &str = "APIWATCH_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    // A local .env may supply POSTMAN_API_KEY; CI sets it directly.
    let _ = dotenvy::dotenv();
    init_tracing();

    match apiwatch::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(apiwatch::Error::Cli(err)) => err.exit(),
        Err(err) => {
            if std::env::var_os("GITHUB_ACTIONS").is_some() {
                println!("{}", apiwatch::report::error_annotation(&err.to_string()));
            }
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
