//! Resolution locators
//!
//! A node's `resolved` field is either a tarball URL, a git locator of the
//! form `git+<url>#<revision>`, or empty.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UnwrapError};

/// Prefix marking a git resolution
pub const GIT_PREFIX: &str = "git+";

/// Revision used when a git locator has no `#fragment`
pub const DEFAULT_REVISION: &str = "master";

/// Repository URL plus the revision to check out
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitLocator {
    pub url: String,
    pub revision: String,
}

impl GitLocator {
    /// Returns true if `raw` should be fetched with git rather than HTTP
    pub fn is_git(raw: &str) -> bool {
        raw.starts_with(GIT_PREFIX)
    }
}

impl FromStr for GitLocator {
    type Err = UnwrapError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = || UnwrapError::InvalidLocator {
            locator: raw.to_string(),
        };

        let rest = raw.strip_prefix(GIT_PREFIX).ok_or_else(invalid)?;
        let (url, revision) = match rest.split_once('#') {
            Some((url, revision)) => (url, revision),
            None => (rest, ""),
        };

        if url.is_empty() {
            return Err(invalid());
        }

        let revision = if revision.is_empty() {
            DEFAULT_REVISION
        } else {
            revision
        };

        Ok(Self {
            url: url.to_string(),
            revision: revision.to_string(),
        })
    }
}

impl fmt::Display for GitLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GIT_PREFIX}{}#{}", self.url, self.revision)
    }
}

/// Where a dependency's artifact comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// HTTP(S) or `file:` tarball
    Tarball(String),
    /// Git repository at a revision
    Git(GitLocator),
    /// No `resolved` field; needs an external lookup before it can be fetched
    Unresolved,
}

impl Resolution {
    /// Parse a raw `resolved` value. Empty or whitespace-only input is unresolved.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            Ok(Self::Unresolved)
        } else if GitLocator::is_git(raw) {
            Ok(Self::Git(raw.parse()?))
        } else {
            Ok(Self::Tarball(raw.to_string()))
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tarball(url) => f.write_str(url),
            Self::Git(locator) => locator.fmt(f),
            Self::Unresolved => f.write_str("<unresolved>"),
        }
    }
}
