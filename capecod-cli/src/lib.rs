//! Command-line interface for the Cape Cod guide.
//!
//! Every subcommand reads the JSON content directory, so its location can
//! come from `--data-dir`, a `CAPECOD_CMDS_<COMMAND>_DATA_DIR` environment
//! variable or a configuration file, layered by `ortho_config`.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod content;
mod error;
mod filter;
mod itinerary;
mod rate;

pub use error::CliError;

use content::{SearchArgs, ShowArgs, TownArgs};
use filter::FilterArgs;
use itinerary::{DefaultCompletionProviderBuilder, ItineraryArgs};
use rate::RateArgs;

const ARG_DATA_DIR: &str = "data-dir";
const ARG_SCHEMA: &str = "schema";
const ARG_WEIGHTS: &str = "weights";
const ARG_CRITERION: &str = "criterion";
const ARG_KIND: &str = "kind";
const ARG_ID: &str = "id";
const ARG_QUERY: &str = "query";
const ARG_TOWN_NAME: &str = "name";
const ARG_START_DATE: &str = "start-date";
const ARG_END_DATE: &str = "end-date";
const ARG_API_KEY: &str = "api-key";
const ARG_BASE_URL: &str = "base-url";
const ARG_MODEL: &str = "model";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_SHOW_KIND: &str = "CAPECOD_CMDS_SHOW_KIND";
const ENV_SHOW_ID: &str = "CAPECOD_CMDS_SHOW_ID";
const ENV_SEARCH_QUERY: &str = "CAPECOD_CMDS_SEARCH_QUERY";
const ENV_TOWN_NAME: &str = "CAPECOD_CMDS_TOWN_NAME";
const ENV_START_DATE: &str = "CAPECOD_CMDS_ITINERARY_START_DATE";
const ENV_END_DATE: &str = "CAPECOD_CMDS_ITINERARY_END_DATE";

/// Content directory used when none is configured.
const DEFAULT_DATA_DIR: &str = "data";
/// Schema file looked up inside the content directory by default.
const DEFAULT_SCHEMA_FILE: &str = "rating_schema.json";

/// Run the CLI with the current process arguments and environment.
///
/// Help and version requests print to stdout and succeed.
///
/// # Errors
///
/// Returns [`CliError`] when arguments are invalid or the selected command
/// fails.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            err.print().map_err(CliError::WriteOutput)?;
            return Ok(());
        }
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Rate(args) => rate::run_rate(args, writer),
        Command::Filter(args) => filter::run_filter(args, writer),
        Command::Show(args) => content::run_show(args, writer),
        Command::Search(args) => content::run_search(args, writer),
        Command::Town(args) => content::run_town(args, writer),
        Command::Itinerary(args) => {
            itinerary::run_itinerary_with(args, &DefaultCompletionProviderBuilder, writer)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded in tests.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

#[derive(Debug, Parser)]
#[command(
    name = "capecod",
    about = "Browse, rate and plan trips around Cape Cod's beaches and towns",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every beach against the rating schema.
    Rate(RateArgs),
    /// List beaches whose ratings satisfy every criterion.
    Filter(FilterArgs),
    /// Print one content entry.
    Show(ShowArgs),
    /// Search content by name or description.
    Search(SearchArgs),
    /// Print everything known about a town.
    Town(TownArgs),
    /// Generate a trip itinerary.
    Itinerary(ItineraryArgs),
}

fn data_dir_or_default(data_dir: Option<Utf8PathBuf>) -> Utf8PathBuf {
    data_dir.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR))
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    write_text(writer, &payload)
}

fn write_text(writer: &mut dyn Write, text: &str) -> Result<(), CliError> {
    writer
        .write_all(text.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
