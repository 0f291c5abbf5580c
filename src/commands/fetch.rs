//! Fetch command implementation
//!
//! Fills the artifact cache for every module in the shrinkwrap file without
//! touching any node_modules directory.

use npm_unwrap::error::Result;
use npm_unwrap::installer::{NpmCli, PackageManager};
use npm_unwrap::{Cache, Fetcher, classify};

use crate::cli::{FetchArgs, GlobalArgs};
use crate::commands::helpers::load_tree;

/// Run fetch command
pub fn run(global: &GlobalArgs, args: &FetchArgs) -> Result<()> {
    let settings = global.settings()?;
    let npm = NpmCli::new(&settings.npm_bin);
    let app = load_tree(
        &global.shrinkwrap,
        args.resolve_missing.then_some(&npm as &dyn PackageManager),
    )?;

    let plan = classify(&app);
    let cache = Cache::new(&settings.cache_dir);
    let report = Fetcher::from_settings(&settings)?.fetch(&plan, &cache)?;

    println!(
        "Fetched {} of {} tarball(s) and {} of {} repository(ies) into {}",
        report.downloaded,
        plan.tarballs.len(),
        report.cloned,
        plan.repositories.len(),
        cache.root().display()
    );
    for id in &plan.unresolved {
        println!("  unresolved: {id}");
    }
    Ok(())
}
