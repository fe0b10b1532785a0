//! Torrent-Ripple main entry point
//!
//! This is the command-line interface for the Torrent-Ripple search aggregator.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use torrent_ripple::config::{load_config, Config};
use torrent_ripple::output::{print_aggregate, render_all_failed};
use torrent_ripple::{lookup, RippleError, SearchRequest, SourceId, SourceRegistry};
use tracing_subscriber::EnvFilter;

/// Torrent-Ripple: search several torrent sites at once
///
/// The query is sent to every selected site concurrently. Sites that fail or
/// time out are reported, and the results of the others are merged and
/// ranked by seeders.
#[derive(Parser, Debug)]
#[command(name = "torrent-ripple")]
#[command(version = "1.0.0")]
#[command(about = "Search several torrent sites at once", long_about = None)]
struct Cli {
    /// Search keywords
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    query: Vec<String>,

    /// Sources to search: arc, td, tpb, otts, ygg, or all
    #[arg(short, long, value_delimiter = ',', value_name = "SOURCES")]
    sources: Option<Vec<String>>,

    /// Per-source timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let request = build_request(&cli, &config)?;
    let registry = SourceRegistry::from_config(&config)?;

    handle_search(&registry, &request).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so they never mix with the results table.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("torrent_ripple=info,warn"),
            1 => EnvFilter::new("torrent_ripple=debug,info"),
            2 => EnvFilter::new("torrent_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the search request, command-line flags taking precedence over the config file
fn build_request(cli: &Cli, config: &Config) -> Result<SearchRequest, RippleError> {
    let sources = match &cli.sources {
        Some(names) => SourceId::parse_list(names)?,
        None => config.search.sources.iter().copied().collect(),
    };

    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.search.timeout());

    SearchRequest::new(&cli.query.join(" "), timeout, sources)
}

/// Handles the search and prints its results
///
/// A search in which every source failed is reported once on stderr and
/// exits with a failure code.
async fn handle_search(
    registry: &SourceRegistry,
    request: &SearchRequest,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let names: Vec<&str> = request.sources().iter().map(|s| s.display_name()).collect();
    tracing::info!("Sources: {}", names.join(", "));

    match lookup(registry, request).await {
        Ok(aggregate) => {
            print_aggregate(&aggregate);
            Ok(ExitCode::SUCCESS)
        }
        Err(RippleError::AllSourcesFailed { failures }) => {
            eprint!("{}", render_all_failed(&failures));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
