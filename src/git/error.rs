//! Git error interpretation
//!
//! libgit2 messages are long and transport specific; the common failure
//! kinds are reduced to a short reason for the user.

use git2::{Error, ErrorClass};

type Matcher = fn(&str, ErrorClass) -> bool;

const REASONS: &[(Matcher, &str)] = &[
    (
        |msg, _| {
            msg.contains("not found")
                || msg.contains("404")
                || msg.contains("does not appear to be a git repository")
                || msg.contains("too many redirects")
        },
        "Repository not found",
    ),
    (
        |msg, _| msg.contains("authentication") || msg.contains("credentials"),
        "Authentication failed",
    ),
    (
        |msg, _| msg.contains("permission denied") || msg.contains("access denied"),
        "Permission denied",
    ),
    (
        |msg, _| {
            msg.contains("connection")
                || msg.contains("network")
                || msg.contains("timed out")
                || msg.contains("timeout")
        },
        "Network error",
    ),
    (
        |msg, class| class == ErrorClass::Http && msg.contains("certificate"),
        "Certificate error",
    ),
    (
        |msg, class| (class == ErrorClass::Http || class == ErrorClass::Ssl) && msg.contains("ssl"),
        "SSL error",
    ),
];

/// Short user-facing reason for a git2 error
pub fn describe(err: &Error) -> String {
    let message = err.message().to_lowercase();

    if let Some((_, reason)) = REASONS
        .iter()
        .find(|(matches, _)| matches(&message, err.class()))
    {
        return (*reason).to_string();
    }

    match err.class() {
        ErrorClass::Http => format!("HTTP error: {}", err.message()),
        ErrorClass::Ssh => format!("SSH error: {}", err.message()),
        _ => err.message().to_string(),
    }
}
