//! Cache location and entry naming
//!
//! All entries live flat in one directory:
//! - tarballs under the basename of their URL (`left-pad-1.3.0.tgz`)
//! - git checkouts under `<name>__<revision>`, both made path-safe

use std::path::PathBuf;

use crate::error::{Result, cache};
use crate::path_utils::make_path_safe;

/// Directory name under the platform cache directory
const CACHE_DIR: &str = "npm-unwrap";

/// Environment variable overriding the cache location
pub const CACHE_DIR_ENV: &str = "NPM_UNWRAP_CACHE_DIR";

/// Separator between module name and revision in repository entries
const REPOSITORY_SEPARATOR: &str = "__";

/// Get the default cache directory path
///
/// Uses the platform's standard cache location with an `npm-unwrap`
/// subdirectory. Can be overridden with the `NPM_UNWRAP_CACHE_DIR` environment variable.
pub fn cache_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir()
        .ok_or_else(|| cache::operation_failed("Could not determine cache directory"))?;

    Ok(base.join(CACHE_DIR))
}

/// Cache file name for a tarball locator: the last path segment, without
/// query string or fragment.
///
/// Returns `None` when the locator has no usable file name.
pub fn tarball_file_name(locator: &str) -> Option<&str> {
    let end = locator.find(['?', '#']).unwrap_or(locator.len());
    let name = locator[..end].rsplit('/').next()?;

    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        None
    } else {
        Some(name)
    }
}

/// Cache file name tried for a node with no resolution: `<name>-<version>.tgz`
/// with any `@scope/` removed, the way the registry names tarballs.
pub fn fallback_tarball_name(name: &str, version: &str) -> String {
    let unscoped = name.rsplit_once('/').map_or(name, |(_, name)| name);
    format!("{}-{}.tgz", make_path_safe(unscoped), make_path_safe(version))
}

/// Cache directory name for a git checkout
pub fn repository_dir_name(name: &str, revision: &str) -> String {
    format!(
        "{}{}{}",
        make_path_safe(name),
        REPOSITORY_SEPARATOR,
        make_path_safe(revision)
    )
}
