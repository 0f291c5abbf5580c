//! npm-unwrap - install npm-shrinkwrap.json trees without the npm client
//!
//! Fetches every tarball and git dependency of a shrinkwrap file into a local
//! cache, then lays out nested node_modules directories and runs install
//! scripts bottom-up.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Log filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "npm_unwrap=debug"
    } else {
        "npm_unwrap=info"
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Commands::Install(args) => commands::install::run(&cli.global, args),
        Commands::Fetch(args) => commands::fetch::run(&cli.global, args),
        Commands::Tree(args) => commands::tree::run(&cli.global, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
