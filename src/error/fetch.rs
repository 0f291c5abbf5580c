//! Artifact fetch and extraction errors

use std::path::Path;

use super::UnwrapError;

/// Creates a download failed error
pub fn download_failed(url: impl Into<String>, reason: impl ToString) -> UnwrapError {
    UnwrapError::DownloadFailed {
        url: url.into(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a non-success HTTP response
pub fn http_status(url: impl Into<String>, status: u16) -> UnwrapError {
    UnwrapError::HttpStatus {
        url: url.into(),
        status,
    }
}

/// Creates an archive extraction error
pub fn archive_failed(archive: &Path, reason: impl ToString) -> UnwrapError {
    UnwrapError::ArchiveFailed {
        archive: archive.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a module whose artifact is not in the cache
pub fn artifact_missing(module: impl Into<String>, path: &Path) -> UnwrapError {
    UnwrapError::ArtifactMissing {
        module: module.into(),
        path: path.display().to_string(),
    }
}

/// Collapses per-artifact failures into one error
pub fn aggregate(failures: Vec<UnwrapError>) -> UnwrapError {
    UnwrapError::FetchFailed {
        count: failures.len(),
        failures,
    }
}
