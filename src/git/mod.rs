//! Git access for git-resolved dependencies
//!
//! A git dependency is installed from a full clone checked out at the
//! revision named in its locator. Authentication is delegated to git's
//! native credential system (SSH agent, keys in ~/.ssh/, credential helpers).

mod auth;
mod checkout;
mod clone;
mod error;
mod refs;
mod url;

use std::path::Path;

use crate::error::Result;

/// Fetches a repository working tree at a given revision
pub trait VcsClient: Sync {
    /// Clone `url` into `target` (which must not exist or be empty) and check
    /// out `revision`. Returns the id of the checked-out commit.
    fn checkout(&self, url: &str, revision: &str, target: &Path) -> Result<String>;
}

/// [`VcsClient`] backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Client;

impl VcsClient for Git2Client {
    fn checkout(&self, url: &str, revision: &str, target: &Path) -> Result<String> {
        let repo = clone::clone(url, target)?;
        let commit = refs::resolve_revision(&repo, revision)?;
        checkout::checkout_commit(&repo, &commit)?;

        let id = commit.id().to_string();
        tracing::debug!("Checked out {} at {} ({})", url, revision, id);
        Ok(id)
    }
}
