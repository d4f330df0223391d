//! timein - Current local time for any city or landmark
//!
//! Resolves a free-text place name to coordinates, the coordinates to an IANA
//! timezone, and renders the current time in that zone. Resolved timezones are
//! kept in a bounded, disk-persisted LRU cache so repeated queries skip the
//! network entirely.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use timein::cache::{TimezoneStore, DEFAULT_CAPACITY};
use timein::cli::{Cli, OutputFormat};
use timein::lookup::{ClockFormatter, NominatimClient, OpenMeteoTimezoneClient};
use timein::output::Presenter;
use timein::resolver::{ResolveError, Resolver};

/// Logs go to stderr so they never mix with the result on stdout
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let presenter = Presenter::new(cli.format);

    let mut store = match TimezoneStore::open_in(&cli.resolve_cache_dir(), DEFAULT_CAPACITY) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if cli.clear_cache {
        return match store.clear() {
            Ok(()) => {
                println!("Timezone cache cleared.");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    let resolver = Resolver::new(
        store,
        NominatimClient::new(),
        OpenMeteoTimezoneClient::new(),
        ClockFormatter::new(),
    );

    match resolver.resolve(&cli.query_string()).await {
        Ok(resolution) => {
            println!("{}", presenter.success(&resolution));
            ExitCode::SUCCESS
        }
        Err(err) => match cli.format {
            // Alfred reads stdout; its empty-query prompt row is not a failure
            OutputFormat::Alfred => {
                println!("{}", presenter.failure(&err));
                if matches!(err, ResolveError::EmptyQuery) {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            OutputFormat::Plain => {
                eprintln!("{}", presenter.failure(&err));
                ExitCode::FAILURE
            }
        },
    }
}
