//! npm-unwrap - install an npm-shrinkwrap dependency tree without npm
//!
//! The work happens in two stages:
//! - **fetch**: classify the tree ([`classify`]) and fill the artifact
//!   [`Cache`] with tarballs (in parallel) and git checkouts (one at a time)
//! - **install**: walk the tree depth-first, unpack each module into its
//!   nested `node_modules` position, run install scripts after the module's
//!   own dependencies, and link executables ([`Installer`])
//!
//! npm itself is only invoked for install scripts and, on request, to look up
//! tarballs for modules the lockfile left unresolved.

pub mod archive;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod installer;
pub mod path_utils;
pub mod progress;
pub mod resolver;

#[cfg(test)]
mod test_fixtures;

pub use cache::{Cache, FetchReport, Fetcher};
pub use classifier::{FetchPlan, RepositoryJob, classify};
pub use config::Settings;
pub use domain::{App, DependencyNode, GitLocator, Resolution};
pub use error::{Result, UnwrapError};
pub use installer::{InstallReport, Installer, ModuleState};
