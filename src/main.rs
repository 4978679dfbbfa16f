mod cli;
mod client;
mod commands;
mod environment;
mod error;
mod logging;
mod options;
mod output;
mod poll;
mod types;

use clap::Parser;

use cli::{Cli, Command};
use error::{ApiError, CliError};
use output::{output_error, ErrorReport};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let (result, fallback) = match cli.command {
        Command::Parse(args) => (commands::parse::run(args).await, "Failed to parse document"),
        Command::Upload(args) => (commands::upload::run(args).await, "Failed to upload file"),
        Command::Version(args) => (commands::version::run(args).await, "Failed to get version"),
    };

    if let Err(err) = result {
        let report = ErrorReport::from_error(headline(&err, fallback), &err);
        output_error(&report);
        std::process::exit(1);
    }
}

/// Top-level message for the error report; the full cause lands in `details`.
fn headline<'a>(err: &CliError, fallback: &'a str) -> &'a str {
    match err {
        CliError::Api(ApiError::Timeout(_)) => "Timeout",
        CliError::Api(ApiError::Api { .. }) | CliError::Api(ApiError::Request(_)) => "API error",
        _ => fallback,
    }
}
