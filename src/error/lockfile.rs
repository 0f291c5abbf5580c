//! Lockfile and package metadata errors

use std::path::Path;

use super::UnwrapError;

/// Creates a lockfile parse error
pub fn parse_failed(path: &Path, reason: impl ToString) -> UnwrapError {
    UnwrapError::LockfileParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a dependency name that cannot be a directory under node_modules
pub fn invalid_module_name(name: &str) -> UnwrapError {
    UnwrapError::InvalidModuleName {
        name: name.to_string(),
    }
}

/// Creates a package.json parse error
pub fn metadata_failed(path: &Path, reason: impl ToString) -> UnwrapError {
    UnwrapError::MetadataParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
