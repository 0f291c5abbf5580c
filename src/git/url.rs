//! URL normalization for git operations
//!
//! Git resolutions in a shrinkwrap come in the shapes npm accepts, not all of
//! which libgit2 understands:
//! - SCP-style `git@host:user/repo.git`
//! - `ssh://git@host:user/repo.git` (SCP path behind an `ssh://` scheme)
//! - `file://relative/path` or Windows-style `file://C:\path`

use std::borrow::Cow;

/// Rewrite a git URL into a form libgit2 can clone.
pub fn normalize_for_clone(url: &str) -> Cow<'_, str> {
    match normalize_ssh_url(url) {
        Cow::Borrowed(url) => normalize_file_url(url),
        Cow::Owned(url) => Cow::Owned(normalize_file_url(&url).into_owned()),
    }
}

/// `git@host:path` and `ssh://git@host:path` become `ssh://git@host/path`.
///
/// A numeric segment after the colon followed by `/` is a port and is left alone.
fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    let (rest, had_scheme) = match url.strip_prefix("ssh://") {
        Some(rest) => (rest, true),
        None if url.starts_with("git@") => (url, false),
        None => return Cow::Borrowed(url),
    };

    let Some((host, path)) = rest.split_once(':') else {
        return Cow::Borrowed(url);
    };
    if host.contains('/') {
        return Cow::Borrowed(url);
    }

    let is_port = path
        .split_once('/')
        .is_some_and(|(port, _)| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()));
    if is_port {
        return if had_scheme {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("ssh://{rest}"))
        };
    }

    let path = path.trim_start_matches('/');
    Cow::Owned(format!("ssh://{host}/{path}"))
}

/// Make `file://` URLs absolute so libgit2 resolves them on Unix.
fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(after) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };
    if after.contains('\\') {
        return Cow::Owned(format!("file:///{}", after.replace('\\', "/")));
    }
    if !after.is_empty() && !after.starts_with('/') {
        return Cow::Owned(format!("file:///{after}"));
    }
    Cow::Borrowed(url)
}
