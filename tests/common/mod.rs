//! Common test utilities for npm-unwrap integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A scratch directory holding the app, its artifacts and the cache
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Cache directory used by [`TestWorkspace::cmd`]
    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("cache")
    }

    /// Build an npm-style tarball (every entry under `package/`) and return
    /// its `file://` URL
    pub fn write_tarball(&self, path: &str, files: &[(&str, &str)]) -> String {
        let tarball_path = self.path.join(path);
        if let Some(parent) = tarball_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }

        let file = std::fs::File::create(&tarball_path).expect("Failed to create tarball");
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(if name.starts_with("bin/") { 0o755 } else { 0o644 });
            header.set_cksum();
            builder
                .append_data(&mut header, format!("package/{name}"), content.as_bytes())
                .expect("Failed to append tarball entry");
        }
        builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .expect("Failed to finish tarball");

        file_url(&tarball_path)
    }

    /// Initialize a git repository in workspace
    pub fn git_repo(&self, path: &str) -> GitRepo {
        GitRepo::init(&self.path.join(path))
    }

    /// Write `npm-shrinkwrap.json` into `app/`
    pub fn write_shrinkwrap(&self, json: &serde_json::Value) -> PathBuf {
        let content = serde_json::to_string_pretty(json).expect("Failed to serialize shrinkwrap");
        self.write_file("app/npm-shrinkwrap.json", &content);
        self.path.join("app/npm-shrinkwrap.json")
    }

    /// npm-unwrap running in `app/` with this workspace's cache
    pub fn cmd(&self) -> Command {
        std::fs::create_dir_all(self.path.join("app")).expect("Failed to create app directory");
        let mut cmd = npm_unwrap_cmd();
        cmd.current_dir(self.path.join("app"))
            .env("NPM_UNWRAP_CACHE_DIR", self.cache_dir())
            .env_remove("NPM_UNWRAP_CONCURRENCY")
            .env_remove("NPM_UNWRAP_NPM")
            .env_remove("RUST_LOG")
            .arg("--no-progress");
        cmd
    }
}

/// The npm-unwrap binary under test
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn npm_unwrap_cmd() -> Command {
    Command::cargo_bin("npm-unwrap").expect("npm-unwrap binary not built")
}

pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// A real repository on disk, committed to with libgit2
pub struct GitRepo {
    pub path: PathBuf,
    repo: Repository,
}

impl GitRepo {
    fn init(path: &Path) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repository directory");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("master");
        let repo = Repository::init_opts(path, &options).expect("Failed to init repository");
        Self {
            path: path.to_path_buf(),
            repo,
        }
    }

    /// `git+file://` locator for `revision`
    pub fn locator(&self, revision: &str) -> String {
        format!("git+{}#{}", file_url(&self.path), revision)
    }

    /// Write `files` and commit everything in the working tree
    pub fn commit(&self, files: &[(&str, &str)], message: &str) {
        for (name, content) in files {
            let full = self.path.join(name);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(full, content).expect("Failed to write file");
        }

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let signature = Signature::now("Test", "test@example.com").expect("Failed to sign");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit");
    }

    /// Tag HEAD
    pub fn tag(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel(git2::ObjectType::Commit))
            .expect("Failed to resolve HEAD");
        self.repo
            .tag_lightweight(name, &head, false)
            .expect("Failed to tag");
    }
}
