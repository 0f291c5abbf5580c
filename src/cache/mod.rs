//! Local artifact cache
//!
//! Fetched artifacts are kept between runs so a second install of the same
//! tree never touches the network.
//!
//! ## Cache Structure
//!
//! ```text
//! ~/.cache/npm-unwrap/
//! ├── left-pad-1.3.0.tgz      tarball, named after its URL
//! ├── bar-1.0.0.tgz
//! └── foo__v2.0.0/            git checkout, <name>__<revision>
//! ```
//!
//! Presence of an entry is the cache-hit signal. Entries only ever appear
//! through an atomic rename, so a present entry is always complete.

pub mod download;
pub mod fetcher;
pub mod paths;
pub mod pool;
pub mod repos;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, cache};

pub use download::{Downloader, HttpDownloader};
pub use fetcher::{FetchReport, Fetcher};
pub use pool::WorkerPool;

/// Handle on a cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    /// Use `root` as the cache directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the default cache directory (see [`paths::cache_dir`])
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(paths::cache_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the cache directory if it does not exist
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            cache::operation_failed(format!(
                "Failed to create cache directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Cache path of the tarball behind `locator`
    pub fn tarball_path(&self, locator: &str) -> Result<PathBuf> {
        paths::tarball_file_name(locator)
            .map(|name| self.root.join(name))
            .ok_or_else(|| {
                cache::operation_failed(format!("Cannot derive a cache file name from '{locator}'"))
            })
    }

    /// Cache path tried for a node with no resolution
    pub fn fallback_tarball_path(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(paths::fallback_tarball_name(name, version))
    }

    /// Cache directory of a git checkout
    pub fn repository_path(&self, name: &str, revision: &str) -> PathBuf {
        self.root.join(paths::repository_dir_name(name, revision))
    }
}
