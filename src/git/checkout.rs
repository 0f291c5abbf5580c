//! Working tree checkout

use git2::{Commit, Repository, build::CheckoutBuilder};

use crate::error::{Result, git};

/// Force the working tree to `commit` and detach HEAD there
pub fn checkout_commit(repo: &Repository, commit: &Commit<'_>) -> Result<()> {
    let revision = commit.id().to_string();

    let mut checkout = CheckoutBuilder::new();
    checkout.force().remove_untracked(true);

    repo.checkout_tree(commit.as_object(), Some(&mut checkout))
        .map_err(|e| git::checkout_failed(&revision, e.message()))?;

    repo.set_head_detached(commit.id())
        .map_err(|e| git::checkout_failed(&revision, e.message()))
}
