//! Cache errors

use super::UnwrapError;

/// Creates a cache operation failed error
pub fn operation_failed(message: impl Into<String>) -> UnwrapError {
    UnwrapError::CacheOperationFailed {
        message: message.into(),
    }
}
