//! Command-line interface for the courier dispatch engine.
//!
//! The `courier enumerate` command reads a JSON dispatch snapshot, binds every
//! courier to its cost model, enumerates feasible bundles per shop and
//! courier, and prints the result as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod enumerate;
mod error;
mod fs;
mod report;
mod snapshot;

use enumerate::{EnumerateArgs, run_enumerate};
pub use error::CliError;

const ARG_SNAPSHOT: &str = "snapshot";
const ARG_MAX_ROUTE_LEN: &str = "max-route-len";
const ARG_DEADLINE_MS: &str = "deadline-ms";
const ARG_THREADS: &str = "threads";
const ARG_OUTPUT: &str = "output";
const ENV_SNAPSHOT: &str = "COURIER_CMDS_ENUMERATE_SNAPSHOT";

/// Run the courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// snapshot cannot be read, a courier cannot be bound to a cost model, or
/// the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Enumerate(args) => run_enumerate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Route feasibility and bundle enumeration for courier dispatch",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enumerate feasible routes from a dispatch snapshot.
    Enumerate(EnumerateArgs),
}

#[cfg(test)]
mod tests;
