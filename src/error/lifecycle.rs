//! External package-manager errors

use std::process::ExitStatus;

use super::UnwrapError;

/// Creates an install script failure from the process exit status
pub fn script_failed(module: impl Into<String>, status: ExitStatus) -> UnwrapError {
    let status = status
        .code()
        .map_or_else(|| "no exit code (terminated by signal)".to_string(), |code| {
            format!("exit code {code}")
        });
    UnwrapError::LifecycleFailed {
        module: module.into(),
        status,
    }
}

/// Creates an error for a command that could not be started or exited nonzero
pub fn command_failed(command: impl Into<String>, reason: impl ToString) -> UnwrapError {
    UnwrapError::CommandFailed {
        command: command.into(),
        reason: reason.to_string(),
    }
}
