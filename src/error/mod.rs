//! Error types and handling for npm-unwrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors are grouped into sub-modules by error domain:
//! - [`fetch`]: Tarball download and archive errors
//! - [`git`]: Git clone and checkout errors
//! - [`lifecycle`]: External package-manager errors
//! - [`lockfile`]: Shrinkwrap and package.json errors
//! - [`fs`]: File system errors
//! - [`cache`]: Cache errors

pub mod cache;
pub mod fetch;
pub mod fs;
pub mod git;
pub mod lifecycle;
pub mod lockfile;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for npm-unwrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum UnwrapError {
    // Fetch errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(npm_unwrap::fetch::download_failed),
        help("Check that the registry is reachable and the resolved URL is correct")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to download {url}: HTTP {status}")]
    #[diagnostic(code(npm_unwrap::fetch::http_status))]
    HttpStatus { url: String, status: u16 },

    #[error("{count} artifact(s) failed to fetch")]
    #[diagnostic(
        code(npm_unwrap::fetch::failed),
        help("No modules were installed; fix the failing artifacts and rerun")
    )]
    FetchFailed {
        count: usize,
        #[related]
        failures: Vec<UnwrapError>,
    },

    #[error("Failed to extract {archive}: {reason}")]
    #[diagnostic(code(npm_unwrap::fetch::archive_failed))]
    ArchiveFailed { archive: String, reason: String },

    #[error("Cached artifact for '{module}' not found at {path}")]
    #[diagnostic(
        code(npm_unwrap::fetch::artifact_missing),
        help("Run 'npm-unwrap fetch' before installing")
    )]
    ArtifactMissing { module: String, path: String },

    #[error("Invalid git locator: {locator}")]
    #[diagnostic(
        code(npm_unwrap::fetch::invalid_locator),
        help("Git resolutions look like git+https://host/repo.git#revision")
    )]
    InvalidLocator { locator: String },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(npm_unwrap::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(npm_unwrap::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout '{revision}': {reason}")]
    #[diagnostic(code(npm_unwrap::git::checkout_failed))]
    GitCheckoutFailed { revision: String, reason: String },

    #[error("Failed to fetch git dependency '{module}': {reason}")]
    #[diagnostic(code(npm_unwrap::git::repository_failed))]
    RepositoryFetchFailed { module: String, reason: String },

    // External process errors
    #[error("Install script for '{module}' failed with {status}")]
    #[diagnostic(
        code(npm_unwrap::lifecycle::failed),
        help("Run 'npm run-script install' inside the module directory to see the full output")
    )]
    LifecycleFailed { module: String, status: String },

    #[error("Failed to run '{command}': {reason}")]
    #[diagnostic(code(npm_unwrap::lifecycle::command_failed))]
    CommandFailed { command: String, reason: String },

    // Lockfile errors
    #[error("Failed to parse lockfile: {path}: {reason}")]
    #[diagnostic(
        code(npm_unwrap::lockfile::parse_failed),
        help("The lockfile must be an npm-shrinkwrap.json style document")
    )]
    LockfileParseFailed { path: String, reason: String },

    #[error("Invalid module name '{name}'")]
    #[diagnostic(
        code(npm_unwrap::lockfile::invalid_module_name),
        help("Module names are a single directory name or an @scope/name pair")
    )]
    InvalidModuleName { name: String },

    #[error("Failed to parse package metadata: {path}: {reason}")]
    #[diagnostic(code(npm_unwrap::lockfile::metadata_failed))]
    MetadataParseFailed { path: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(npm_unwrap::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(npm_unwrap::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(npm_unwrap::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(npm_unwrap::cache::operation_failed))]
    CacheOperationFailed { message: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, UnwrapError>;
