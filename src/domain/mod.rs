//! Domain models for npm-unwrap
//!
//! This module contains pure domain objects: the resolved dependency tree
//! produced from a lockfile and the locators recorded on each node.

pub mod locator;
pub mod node;

pub use locator::{DEFAULT_REVISION, GIT_PREFIX, GitLocator, Resolution};
pub use node::{App, DependencyNode, DependencyTree};
