//! Install command implementation
//!
//! The installation process:
//! 1. Read the shrinkwrap file (optionally filling unresolved modules from the registry)
//! 2. Classify the tree into tarball and git jobs
//! 3. Fetch every artifact into the cache; any failure stops here
//! 4. Install the tree depth-first below the destination directory

use npm_unwrap::error::Result;
use npm_unwrap::installer::{NpmCli, PackageManager};
use npm_unwrap::{Cache, Fetcher, Installer, classify};

use crate::cli::{GlobalArgs, InstallArgs};
use crate::commands::helpers::load_tree;

/// Run install command
pub fn run(global: &GlobalArgs, args: &InstallArgs) -> Result<()> {
    let mut settings = global.settings()?;
    settings.ignore_scripts = args.ignore_scripts;

    let npm = NpmCli::new(&settings.npm_bin);
    let app = load_tree(
        &global.shrinkwrap,
        args.resolve_missing.then_some(&npm as &dyn PackageManager),
    )?;

    let plan = classify(&app);
    let cache = Cache::new(&settings.cache_dir);
    Fetcher::from_settings(&settings)?.fetch(&plan, &cache)?;

    let report = Installer::from_settings(&settings).install(&app, &cache, &args.dest)?;

    println!(
        "Installed {} module(s) for {} @ {} into {}",
        report.installed_count(),
        app.name,
        app.version,
        args.dest.display()
    );
    if report.hooks_run > 0 {
        println!("  install scripts run: {}", report.hooks_run);
    }
    if report.link_collisions > 0 {
        println!("  executable link collisions: {}", report.link_collisions);
    }
    for module in report.unresolved() {
        println!("  unresolved: {}", module.id);
    }
    Ok(())
}
