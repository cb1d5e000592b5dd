//! Panorama CLI - survey analytics dashboard.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Options { data, json } => commands::options::run(data, json),

        Commands::Query {
            data,
            filters,
            metric,
            breakdown,
            json,
        } => commands::query::run(data, filters, metric, breakdown, json),

        Commands::Serve {
            data,
            port,
            no_open,
        } => commands::serve::run(data, port, no_open),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "panorama=debug,panorama_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
