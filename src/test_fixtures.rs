//! Test fixtures shared by the unit tests.
//!
//! - temp directories that never land under the working directory
//! - gzip tarballs built in memory ([`TarballBuilder`])
//! - real git repositories on disk ([`GitFixture`])
//! - fakes for the network, git and npm seams

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flate2::Compression;
use flate2::write::GzEncoder;
use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tar::{EntryType, Header};
use tempfile::TempDir;

use crate::cache::Downloader;
use crate::error::{Result, UnwrapError, fetch, git, lifecycle};
use crate::git::VcsClient;
use crate::installer::PackageManager;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_base()).expect("Failed to create temp directory")
}

/// System temp directory, never relative to the working directory
fn temp_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create test files below `base` from (relative path, content) pairs.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(base: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = base.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Builds a `.tgz` in memory, entry by entry.
///
/// ```ignore
/// let bytes = TarballBuilder::new()
///     .file("package/package.json", r#"{"name":"left-pad"}"#)
///     .build();
/// ```
pub struct TarballBuilder {
    builder: tar::Builder<GzEncoder<Vec<u8>>>,
}

impl Default for TarballBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TarballBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default())),
        }
    }

    #[must_use]
    pub fn file(self, path: &str, contents: &str) -> Self {
        self.file_with_mode(path, contents, 0o644)
    }

    /// # Panics
    ///
    /// Panics if the entry cannot be appended.
    #[must_use]
    pub fn file_with_mode(mut self, path: &str, contents: &str, mode: u32) -> Self {
        let mut header = Header::new_gnu();
        header.set_path(path).expect("Failed to set entry path");
        header.set_entry_type(EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder
            .append(&header, contents.as_bytes())
            .expect("Failed to append file entry");
        self
    }

    /// # Panics
    ///
    /// Panics if the entry cannot be appended.
    #[must_use]
    pub fn dir(mut self, path: &str) -> Self {
        let mut header = Header::new_gnu();
        header.set_path(path).expect("Failed to set entry path");
        header.set_entry_type(EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_cksum();
        self.builder
            .append(&header, std::io::empty())
            .expect("Failed to append directory entry");
        self
    }

    /// # Panics
    ///
    /// Panics if the entry cannot be appended.
    #[must_use]
    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = Header::new_gnu();
        header.set_path(path).expect("Failed to set entry path");
        header.set_entry_type(EntryType::Symlink);
        header
            .set_link_name(target)
            .expect("Failed to set link name");
        header.set_size(0);
        header.set_mode(0o777);
        header.set_cksum();
        self.builder
            .append(&header, std::io::empty())
            .expect("Failed to append symlink entry");
        self
    }

    /// Regular file whose name is written byte for byte, bypassing the
    /// path checks of [`Header::set_path`].
    ///
    /// # Panics
    ///
    /// Panics if the name does not fit or the entry cannot be appended.
    #[must_use]
    pub fn raw_file(mut self, name: &str, contents: &str) -> Self {
        let mut header = Header::new_old();
        let bytes = name.as_bytes();
        header.as_old_mut().name[..bytes.len()].copy_from_slice(bytes);
        header.set_entry_type(EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder
            .append(&header, contents.as_bytes())
            .expect("Failed to append raw entry");
        self
    }

    /// # Panics
    ///
    /// Panics if the archive cannot be finished.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder
            .into_inner()
            .expect("Failed to finish tar stream")
            .finish()
            .expect("Failed to finish gzip stream")
    }

    /// # Panics
    ///
    /// Panics if the archive cannot be written.
    pub fn write_to(self, path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, self.build()).expect("Failed to write tarball");
    }
}

/// A git repository on disk whose default branch is `master`
pub struct GitFixture {
    _temp: TempDir,
    pub path: PathBuf,
    repo: Repository,
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl GitFixture {
    /// # Panics
    ///
    /// Panics if the repository cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp = create_temp_dir();
        let path = temp.path().join("origin");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("master");
        let repo = Repository::init_opts(&path, &options).expect("Failed to init git repository");
        Self {
            _temp: temp,
            path,
            repo,
        }
    }

    /// `file://` URL of the repository
    #[must_use]
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Write `files` and commit everything; returns the commit id.
    ///
    /// # Panics
    ///
    /// Panics if any git step fails.
    pub fn commit(&self, files: &[(&str, &str)], message: &str) -> String {
        create_test_files(&self.path, files);

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let signature = Signature::now("npm-unwrap", "npm-unwrap@example.com")
            .expect("Failed to create signature");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit")
            .to_string()
    }

    /// Lightweight tag at HEAD
    ///
    /// # Panics
    ///
    /// Panics if HEAD cannot be tagged.
    pub fn tag(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Failed to read HEAD");
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Failed to create tag");
    }
}

/// [`Downloader`] serving fixed bodies and recording every request.
///
/// Unknown locators answer with HTTP 404.
#[derive(Clone, Default)]
pub struct CountingDownloader {
    bodies: HashMap<String, Vec<u8>>,
    requests: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl CountingDownloader {
    #[must_use]
    pub fn serve(mut self, locator: &str, body: impl AsRef<[u8]>) -> Self {
        self.bodies
            .insert(locator.to_string(), body.as_ref().to_vec());
        self
    }

    /// Sleep this long inside every request
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.lock().expect("request log poisoned").len()
    }

    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn requests_for(&self, locator: &str) -> usize {
        self.requests
            .lock()
            .expect("request log poisoned")
            .iter()
            .filter(|request| request.as_str() == locator)
            .count()
    }
}

impl Downloader for CountingDownloader {
    fn download(&self, locator: &str, sink: &mut dyn Write) -> Result<u64> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(locator.to_string());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let body = self
            .bodies
            .get(locator)
            .ok_or_else(|| fetch::http_status(locator, 404))?;
        sink.write_all(body)
            .map_err(|e| fetch::download_failed(locator, e))?;
        Ok(body.len() as u64)
    }
}

/// [`VcsClient`] that fabricates a checkout instead of cloning.
///
/// The checkout holds a `package.json` naming the repository.
#[derive(Clone, Default)]
pub struct FakeVcs {
    checkouts: Arc<Mutex<usize>>,
    fail_for: Option<String>,
}

impl FakeVcs {
    /// Fail every URL containing `marker`
    #[must_use]
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_for: Some(marker.to_string()),
            ..Self::default()
        }
    }

    /// # Panics
    ///
    /// Panics if the counter is poisoned.
    #[must_use]
    pub fn checkouts(&self) -> usize {
        *self.checkouts.lock().expect("counter poisoned")
    }
}

impl VcsClient for FakeVcs {
    fn checkout(&self, url: &str, revision: &str, target: &Path) -> Result<String> {
        *self.checkouts.lock().expect("counter poisoned") += 1;

        if self
            .fail_for
            .as_deref()
            .is_some_and(|marker| url.contains(marker))
        {
            return Err(git::clone_failed(url, "Repository not found"));
        }

        let name = url
            .rsplit('/')
            .next()
            .unwrap_or(url)
            .trim_end_matches(".git");
        let git_dir = target.join(".git");
        fs::create_dir_all(&git_dir).map_err(|e| crate::error::fs::write_failed(&git_dir, e))?;
        let manifest = target.join("package.json");
        fs::write(
            &manifest,
            format!(r#"{{"name": "{name}", "version": "{revision}"}}"#),
        )
        .map_err(|e| crate::error::fs::write_failed(&manifest, e))?;
        Ok("0".repeat(40))
    }
}

/// [`PackageManager`] that records install runs instead of spawning npm
#[derive(Clone, Default)]
pub struct RecordingPackageManager {
    runs: Arc<Mutex<Vec<PathBuf>>>,
    tarballs: HashMap<String, String>,
    fail_for: Option<String>,
}

impl RecordingPackageManager {
    /// Answer `view` for `name@version` with `url`
    #[must_use]
    pub fn with_tarball(mut self, name: &str, version: &str, url: &str) -> Self {
        self.tarballs
            .insert(format!("{name}@{version}"), url.to_string());
        self
    }

    /// Fail the install step of `module`
    #[must_use]
    pub fn failing_for(mut self, module: &str) -> Self {
        self.fail_for = Some(module.to_string());
        self
    }

    /// Module directories the install step ran in, in order
    ///
    /// # Panics
    ///
    /// Panics if the run log is poisoned.
    #[must_use]
    pub fn runs(&self) -> Vec<PathBuf> {
        self.runs.lock().expect("run log poisoned").clone()
    }
}

impl PackageManager for RecordingPackageManager {
    fn run_install(&self, module: &str, module_dir: &Path) -> Result<()> {
        self.runs
            .lock()
            .expect("run log poisoned")
            .push(module_dir.to_path_buf());

        if self.fail_for.as_deref() == Some(module) {
            return Err(UnwrapError::LifecycleFailed {
                module: module.to_string(),
                status: "exit code 1".to_string(),
            });
        }
        Ok(())
    }

    fn view_tarball(&self, name: &str, version: &str) -> Result<Option<String>> {
        let id = format!("{name}@{version}");
        if self.fail_for.as_deref() == Some(id.as_str()) {
            return Err(lifecycle::command_failed(
                format!("npm view {id} dist.tarball"),
                "registry unreachable",
            ));
        }
        Ok(self.tarballs.get(&id).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("lib/index.js", "x"), ("package.json", "{}")]);

        assert!(temp.path().join("lib/index.js").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_git_fixture_commits_on_master() {
        let fixture = GitFixture::new();
        let id = fixture.commit(&[("a.txt", "a")], "initial");

        let repo = Repository::open(&fixture.path).unwrap();
        let head = repo.head().unwrap();
        assert_eq!(head.shorthand(), Some("master"));
        assert_eq!(head.peel_to_commit().unwrap().id().to_string(), id);
    }

    #[test]
    fn test_tarball_builder_output_is_gzip() {
        let bytes = TarballBuilder::new().file("package/a.js", "a").build();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
