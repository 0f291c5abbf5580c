//! Revision resolution

use git2::{Commit, Oid, Repository};

use crate::error::{Result, git};

/// Resolve a branch, tag or commit id to the commit it names.
///
/// After a clone only the default branch exists under `refs/heads`; other
/// branches are found under `refs/remotes/origin`.
pub fn resolve_revision<'repo>(repo: &'repo Repository, revision: &str) -> Result<Commit<'repo>> {
    let candidates = [
        format!("refs/tags/{revision}"),
        format!("refs/remotes/origin/{revision}"),
        format!("refs/heads/{revision}"),
        revision.to_string(),
    ];

    for candidate in &candidates {
        if let Ok(reference) = repo.find_reference(candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    if let Ok(oid) = Oid::from_str(revision) {
        if let Ok(commit) = repo.find_commit(oid) {
            return Ok(commit);
        }
    }

    repo.revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map_err(|e| git::ref_resolve_failed(revision, e.message()))
}
