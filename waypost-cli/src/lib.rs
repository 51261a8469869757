//! Command-line front end for the Waypost POI browser.
//!
//! `waypost categories` lists the category filter values, `waypost list`
//! prints the POIs passing the filters and `waypost show <name>` selects a
//! POI and reports its distance and travel time.
#![forbid(unsafe_code)]

mod browse;
mod error;
mod location;
mod show;

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};
use log::debug;
use tracing_subscriber::EnvFilter;

use browse::{ListArgs, run_categories, run_list};
use show::{ShowArgs, run_show};

pub use error::CliError;

pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_CATEGORY: &str = "category";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_SHOW_NAME: &str = "name";
pub(crate) const ENV_SHOW_NAME: &str = "WAYPOST_CMDS_SHOW_NAME";

/// Run the Waypost CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// requested POI does not exist or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    execute(cli, &mut stdout)
}

fn execute(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    match cli.command {
        Command::Categories => run_categories(format, writer),
        Command::List(args) => run_list(args, format, writer),
        Command::Show(args) => run_show(args, format, writer),
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        debug!("logging already initialised");
    }
}

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "waypost",
    about = "Browse Toronto points of interest with distance and travel time",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the category filter values.
    Categories,
    /// List points of interest passing the filters.
    List(ListArgs),
    /// Select a point of interest and estimate the trip there.
    Show(ShowArgs),
}

pub(crate) fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

pub(crate) fn write_json<T: serde::Serialize>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    write_line(writer, &payload)
}

#[cfg(test)]
mod tests;
