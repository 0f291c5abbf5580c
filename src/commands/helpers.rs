//! Command helper utilities

use std::path::Path;

use npm_unwrap::App;
use npm_unwrap::config::load_app;
use npm_unwrap::error::{Result, fs};
use npm_unwrap::installer::PackageManager;
use npm_unwrap::resolver;

/// Read the tree from `shrinkwrap`, optionally filling unresolved modules
/// from the registry.
pub fn load_tree(
    shrinkwrap: &Path,
    resolve_missing: Option<&dyn PackageManager>,
) -> Result<App> {
    if !shrinkwrap.is_file() {
        return Err(fs::not_found(shrinkwrap));
    }

    let app = load_app(shrinkwrap)?;
    tracing::debug!(
        "Loaded {} @ {} with {} module(s) from {}",
        app.name,
        app.version,
        app.module_count(),
        shrinkwrap.display()
    );

    Ok(match resolve_missing {
        Some(package_manager) => resolver::fill_missing(&app, package_manager).0,
        None => app,
    })
}
