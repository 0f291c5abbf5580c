//! Repository cloning

use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};

use super::auth::attach_credentials;
use super::error::describe;
use super::url::normalize_for_clone;
use crate::error::{Result, git};

/// Clone `url` into `target` with full history.
///
/// The revision to install may be any branch, tag or commit, so the clone is
/// never shallow.
pub fn clone(url: &str, target: &Path) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    attach_credentials(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    let clone_url = normalize_for_clone(url);
    tracing::debug!("Cloning {} into {}", clone_url, target.display());

    builder
        .clone(clone_url.as_ref(), target)
        .map_err(|e| git::clone_failed(url, describe(&e)))
}
