//! Fetch stage: fill the cache with every artifact a tree needs
//!
//! Tarballs are downloaded through a [`WorkerPool`]; git repositories are
//! cloned afterwards, one at a time. Nothing is installed here.

use std::collections::{BTreeMap, HashSet};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::NamedTempFile;

use super::download::{Downloader, HttpDownloader};
use super::pool::WorkerPool;
use super::repos::{RepositoryReport, fetch_repositories};
use super::Cache;
use crate::classifier::FetchPlan;
use crate::config::{DEFAULT_CONCURRENCY, Settings};
use crate::error::{Result, cache, fetch, fs as fs_error};
use crate::git::{Git2Client, VcsClient};
use crate::progress::DownloadProgress;

/// What one fetch run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Tarballs written to the cache by this run
    pub downloaded: usize,
    /// Tarballs already present
    pub cached: usize,
    /// Repositories cloned by this run
    pub cloned: usize,
    /// Repositories already present
    pub repositories_cached: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Downloaded,
    Cached,
    Cancelled,
}

/// Downloads tarballs and clones repositories into a [`Cache`]
pub struct Fetcher {
    downloader: Box<dyn Downloader>,
    vcs: Box<dyn VcsClient>,
    concurrency: usize,
    progress: bool,
}

impl Fetcher {
    pub fn new(downloader: Box<dyn Downloader>, vcs: Box<dyn VcsClient>) -> Self {
        Self {
            downloader,
            vcs,
            concurrency: DEFAULT_CONCURRENCY,
            progress: false,
        }
    }

    /// HTTP downloads and libgit2 clones, configured from `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(Box::new(HttpDownloader::new()?), Box::new(Git2Client))
            .with_concurrency(settings.concurrency)
            .with_progress(settings.progress))
    }

    /// Maximum number of simultaneous downloads
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Fetch every tarball, then every repository, in `plan`
    pub fn fetch(&self, plan: &FetchPlan, cache: &Cache) -> Result<FetchReport> {
        cache.ensure()?;

        let mut report = self.fetch_tarballs(&plan.tarballs, cache)?;
        let RepositoryReport { cloned, cached } =
            fetch_repositories(self.vcs.as_ref(), &plan.repositories, cache)?;
        report.cloned = cloned;
        report.repositories_cached = cached;

        tracing::info!(
            "Fetched {} tarball(s) ({} cached), {} repository(ies) ({} cached)",
            report.downloaded,
            report.cached,
            report.cloned,
            report.repositories_cached
        );
        Ok(report)
    }

    /// Download every locator missing from the cache.
    ///
    /// The first failure stops jobs that have not started yet; jobs already
    /// running finish. All failures are returned together.
    pub fn fetch_tarballs(&self, locators: &[String], cache: &Cache) -> Result<FetchReport> {
        let mut report = FetchReport::default();
        if locators.is_empty() {
            return Ok(report);
        }
        cache.ensure()?;

        for (target, sharing) in shared_cache_names(locators, cache) {
            tracing::warn!(
                "{} share the cache file {}; only one of them will be downloaded",
                sharing.join(", "),
                target.display()
            );
        }

        let pool = WorkerPool::new(self.concurrency.min(locators.len()))?;
        tracing::debug!(
            "Fetching {} tarball(s) with {} worker(s)",
            locators.len(),
            pool.width()
        );

        let cancelled = AtomicBool::new(false);
        let in_flight = Mutex::new(HashSet::new());
        let progress = DownloadProgress::new(locators.len(), self.progress);

        let outcomes = pool.run(locators, |locator| {
            if cancelled.load(Ordering::SeqCst) {
                return Ok(Outcome::Cancelled);
            }
            let outcome = self.fetch_tarball(locator, cache, &in_flight);
            if outcome.is_err() {
                cancelled.store(true, Ordering::SeqCst);
            }
            progress.finish_one(locator);
            outcome
        });

        let mut failures = Vec::new();
        let mut skipped = 0;
        for outcome in outcomes {
            match outcome {
                Ok(Outcome::Downloaded) => report.downloaded += 1,
                Ok(Outcome::Cached) => report.cached += 1,
                Ok(Outcome::Cancelled) => skipped += 1,
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            progress.finish();
            Ok(report)
        } else {
            progress.abandon();
            tracing::debug!("{} queued download(s) cancelled", skipped);
            Err(fetch::aggregate(failures))
        }
    }

    fn fetch_tarball(
        &self,
        locator: &str,
        cache: &Cache,
        in_flight: &Mutex<HashSet<PathBuf>>,
    ) -> Result<Outcome> {
        let target = cache.tarball_path(locator)?;
        if target.is_file() {
            tracing::debug!("Using cached {}", target.display());
            return Ok(Outcome::Cached);
        }

        let claimed = in_flight
            .lock()
            .map_err(|_| cache::operation_failed("In-flight download set is poisoned"))?
            .insert(target.clone());
        if !claimed {
            tracing::debug!("{} is already being fetched", target.display());
            return Ok(Outcome::Cached);
        }

        tracing::debug!("Downloading {}", locator);
        self.download_atomically(locator, &target, cache.root())
    }

    /// Stream into a temp file in the cache directory, then publish it under
    /// `target` unless another writer got there first.
    fn download_atomically(&self, locator: &str, target: &Path, dir: &Path) -> Result<Outcome> {
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| fs_error::write_failed(dir, e))?;

        self.downloader.download(locator, temp.as_file_mut())?;
        temp.as_file_mut()
            .flush()
            .map_err(|e| fs_error::write_failed(temp.path(), e))?;

        match temp.persist_noclobber(target) {
            Ok(_) => Ok(Outcome::Downloaded),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(Outcome::Cached),
            Err(e) => Err(fs_error::write_failed(target, e.error)),
        }
    }
}

/// Distinct locators whose tarballs map to the same cache file, keyed by
/// that file. Locators without a cache name are left to fail in the fetch.
fn shared_cache_names<'a>(locators: &'a [String], cache: &Cache) -> Vec<(PathBuf, Vec<&'a str>)> {
    let mut by_target: BTreeMap<PathBuf, Vec<&str>> = BTreeMap::new();
    for locator in locators {
        let Ok(target) = cache.tarball_path(locator) else {
            continue;
        };
        let group = by_target.entry(target).or_default();
        if !group.contains(&locator.as_str()) {
            group.push(locator.as_str());
        }
    }

    by_target
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .collect()
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("concurrency", &self.concurrency)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
