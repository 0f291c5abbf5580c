//! Git operation errors

use super::UnwrapError;

/// Creates a clone failed error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> UnwrapError {
    UnwrapError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a checkout failed error
pub fn checkout_failed(revision: impl Into<String>, reason: impl Into<String>) -> UnwrapError {
    UnwrapError::GitCheckoutFailed {
        revision: revision.into(),
        reason: reason.into(),
    }
}

/// Creates a ref resolution error
pub fn ref_resolve_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> UnwrapError {
    UnwrapError::GitRefResolveFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

/// Wraps a clone/checkout error with the module it was fetched for
pub fn repository_failed(module: impl Into<String>, cause: &UnwrapError) -> UnwrapError {
    UnwrapError::RepositoryFetchFailed {
        module: module.into(),
        reason: cause.to_string(),
    }
}
