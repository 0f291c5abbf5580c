//! Git checkouts in the cache
//!
//! Repositories are fetched one at a time. Each is cloned into a staging
//! directory inside the cache and renamed into place once the revision is
//! checked out, so a half-cloned repository never looks like a cache hit.

use std::fs;

use super::Cache;
use crate::classifier::RepositoryJob;
use crate::error::{Result, cache, fs as fs_error, git};
use crate::git::VcsClient;

/// Counts from one pass over the repository jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryReport {
    pub cloned: usize,
    pub cached: usize,
}

/// Make sure every job has a checkout in the cache.
///
/// Stops at the first failure; later jobs are not attempted.
pub fn fetch_repositories(
    vcs: &dyn VcsClient,
    jobs: &[RepositoryJob],
    cache: &Cache,
) -> Result<RepositoryReport> {
    let mut report = RepositoryReport::default();

    for job in jobs {
        let target = cache.repository_path(&job.name, &job.locator.revision);
        if target.is_dir() {
            tracing::debug!("Using cached checkout {}", target.display());
            report.cached += 1;
            continue;
        }

        let staging = tempfile::Builder::new()
            .prefix(".clone-")
            .tempdir_in(cache.root())
            .map_err(|e| {
                cache::operation_failed(format!("Failed to create staging directory: {e}"))
            })?;
        let checkout = staging.path().join("checkout");

        tracing::info!("Cloning {} ({})", job.locator, job.name);
        vcs.checkout(&job.locator.url, &job.locator.revision, &checkout)
            .map_err(|e| {
                let module = format!("{}@{} from {}", job.name, job.version, job.locator);
                git::repository_failed(module, &e)
            })?;

        match fs::rename(&checkout, &target) {
            Ok(()) => report.cloned += 1,
            Err(_) if target.is_dir() => report.cached += 1,
            Err(e) => return Err(fs_error::write_failed(&target, e)),
        }
    }

    Ok(report)
}
