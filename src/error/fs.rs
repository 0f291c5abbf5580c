//! File system errors

use std::path::Path;

use super::UnwrapError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> UnwrapError {
    UnwrapError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read error
pub fn read_failed(path: &Path, reason: impl ToString) -> UnwrapError {
    UnwrapError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: &Path, reason: impl ToString) -> UnwrapError {
    UnwrapError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
