//! rolescope CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or source
//! - 3: Configuration missing or malformed
//! - 4: Clone failure
//! - 5: Recommendation service error
//! - 6: Malformed recommendation response
//! - 7: Request timed out or could not be sent
//! - 130: Interrupted

use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rolescope_core::{CoreError, ErrorKind};

mod commands;
mod output;

use commands::Cli;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_MISSING: u8 = 3;
    pub const CLONE_FAILURE: u8 = 4;
    pub const SERVICE_ERROR: u8 = 5;
    pub const MALFORMED_RESPONSE: u8 = 6;
    pub const UNREACHABLE: u8 = 7;
    pub const INTERRUPTED: u8 = 130;
}

#[derive(Debug, Error)]
#[error("Interrupted")]
struct Interrupted;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // The interrupt branch is polled first so its handler is installed
    // before any work starts.
    let result = tokio::select! {
        biased;
        _ = interrupted() => Err(Interrupted.into()),
        result = commands::recommend::execute(&cli.recommend, cli.quiet) => result,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            output::report_error(&e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "warn,rolescope=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Resolves on ctrl-c. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<Interrupted>().is_some() {
        return ExitCodes::INTERRUPTED;
    }

    match e.downcast_ref::<CoreError>().map(CoreError::kind) {
        Some(ErrorKind::ConfigMissing) => ExitCodes::CONFIG_MISSING,
        Some(ErrorKind::InvalidSource) => ExitCodes::INVALID_ARGS,
        Some(ErrorKind::CloneFailure) => ExitCodes::CLONE_FAILURE,
        Some(ErrorKind::ServiceError) => ExitCodes::SERVICE_ERROR,
        Some(ErrorKind::MalformedResponse) => ExitCodes::MALFORMED_RESPONSE,
        Some(ErrorKind::Timeout) | Some(ErrorKind::Transport) => ExitCodes::UNREACHABLE,
        Some(ErrorKind::Io) | None => ExitCodes::GENERAL_ERROR,
    }
}
