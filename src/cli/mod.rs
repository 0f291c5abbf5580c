//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - fetch: Fetch command arguments
//! - tree: Tree command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use npm_unwrap::Settings;
use npm_unwrap::cache::paths;
use npm_unwrap::config::{DEFAULT_CONCURRENCY, DEFAULT_NPM_BIN, SHRINKWRAP_FILE};
use npm_unwrap::error::Result;

pub mod completions;
pub mod fetch;
pub mod install;
pub mod tree;

pub use completions::CompletionsArgs;
pub use fetch::FetchArgs;
pub use install::InstallArgs;
pub use tree::TreeArgs;

/// npm-unwrap - install npm-shrinkwrap.json trees without npm
///
/// Fetches every tarball and git dependency of a shrinkwrap file into a local
/// cache, then lays the tree out under node_modules.
#[derive(Parser, Debug)]
#[command(
    name = "npm-unwrap",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install an npm-shrinkwrap.json dependency tree without the npm client",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  npm-unwrap install                         \x1b[90m# Fetch and install ./npm-shrinkwrap.json\x1b[0m\n   \
                  npm-unwrap install --dest build/app        \x1b[90m# Install into another directory\x1b[0m\n   \
                  npm-unwrap fetch --concurrency 8           \x1b[90m# Only fill the cache\x1b[0m\n   \
                  npm-unwrap tree -s other/npm-shrinkwrap.json \x1b[90m# Print the resolved tree\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Shrinkwrap file to read
    #[arg(
        long,
        short = 's',
        global = true,
        value_name = "FILE",
        default_value = SHRINKWRAP_FILE
    )]
    pub shrinkwrap: PathBuf,

    /// Artifact cache directory
    #[arg(long, global = true, value_name = "DIR", env = paths::CACHE_DIR_ENV)]
    pub cache_dir: Option<PathBuf>,

    /// Maximum number of parallel tarball downloads
    #[arg(
        long,
        short = 'j',
        global = true,
        env = "NPM_UNWRAP_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY,
        value_parser = clap::value_parser!(usize)
    )]
    pub concurrency: usize,

    /// npm binary used for install scripts and registry lookups
    #[arg(
        long,
        global = true,
        value_name = "PROGRAM",
        env = "NPM_UNWRAP_NPM",
        default_value = DEFAULT_NPM_BIN
    )]
    pub npm: PathBuf,

    /// Hide the download progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Run configuration for these options
    pub fn settings(&self) -> Result<Settings> {
        let cache_dir = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => paths::cache_dir()?,
        };

        let mut settings = Settings::new(cache_dir);
        settings.concurrency = self.concurrency.max(1);
        settings.npm_bin.clone_from(&self.npm);
        settings.progress = !self.no_progress;
        Ok(settings)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all artifacts, then install the tree
    Install(InstallArgs),

    /// Fill the artifact cache without installing
    Fetch(FetchArgs),

    /// Print the resolved dependency tree
    Tree(TreeArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
