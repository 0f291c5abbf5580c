//! Registry fallback for modules without a resolved locator
//!
//! Shrinkwrap files written by old npm versions sometimes leave `resolved`
//! empty. When asked to, the package manager is queried for the published
//! tarball of each such `name@version` and the node is rewritten to point at
//! it. Anything the registry cannot answer stays unresolved.

use crate::domain::{App, DependencyNode, Resolution};
use crate::installer::PackageManager;

/// Counts from one [`fill_missing`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub resolved: usize,
    pub still_missing: usize,
}

/// Return a copy of `app` with unresolved nodes pointed at registry tarballs
/// where the package manager knows one.
pub fn fill_missing(app: &App, package_manager: &dyn PackageManager) -> (App, FillReport) {
    let mut filled = app.clone();
    let mut report = FillReport::default();
    fill_level(&mut filled.dependencies, package_manager, &mut report);

    if report.resolved + report.still_missing > 0 {
        tracing::info!(
            "Resolved {} module(s) from the registry, {} still missing",
            report.resolved,
            report.still_missing
        );
    }
    (filled, report)
}

fn fill_level(
    nodes: &mut [DependencyNode],
    package_manager: &dyn PackageManager,
    report: &mut FillReport,
) {
    for node in nodes {
        if !node.resolution.is_resolved() {
            match package_manager.view_tarball(&node.name, &node.version) {
                Ok(Some(url)) => {
                    tracing::debug!("{} resolved to {}", node.id(), url);
                    node.resolution = Resolution::Tarball(url);
                    report.resolved += 1;
                }
                Ok(None) => {
                    tracing::warn!("Registry has no tarball for {}", node.id());
                    report.still_missing += 1;
                }
                Err(e) => {
                    tracing::warn!("Could not look up {}: {}", node.id(), e);
                    report.still_missing += 1;
                }
            }
        }

        fill_level(&mut node.dependencies, package_manager, report);
    }
}
