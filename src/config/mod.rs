//! Configuration and input documents for npm-unwrap
//!
//! This module contains:
//! - `npm-shrinkwrap.json` - the resolved dependency tree ([`lockfile`])
//! - `package.json` - installed module metadata ([`metadata`])
//! - [`Settings`] - run configuration assembled from CLI flags and environment

pub mod lockfile;
pub mod metadata;

use std::path::PathBuf;

pub use lockfile::{SHRINKWRAP_FILE, load_app, parse_app};
pub use metadata::{MetadataReader, ModuleMetadata, PackageJsonReader};

/// Default number of parallel tarball downloads
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default package-manager binary used for install scripts and registry lookups
pub const DEFAULT_NPM_BIN: &str = "npm";

/// Name of the nested dependency directory
pub const MODULES_DIR: &str = "node_modules";

/// Name of the per-level executable link directory inside [`MODULES_DIR`]
pub const BIN_DIR: &str = ".bin";

/// Run configuration shared by the fetch and install stages
#[derive(Debug, Clone)]
pub struct Settings {
    /// Artifact cache root
    pub cache_dir: PathBuf,
    /// Upper bound on parallel downloads
    pub concurrency: usize,
    /// Package-manager binary
    pub npm_bin: PathBuf,
    /// Skip install scripts and native builds
    pub ignore_scripts: bool,
    /// Show a download progress bar
    pub progress: bool,
}

impl Settings {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            concurrency: DEFAULT_CONCURRENCY,
            npm_bin: PathBuf::from(DEFAULT_NPM_BIN),
            ignore_scripts: false,
            progress: false,
        }
    }
}
