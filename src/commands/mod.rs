//! Command implementations for the npm-unwrap CLI

pub mod completions;
pub mod fetch;
pub mod helpers;
pub mod install;
pub mod tree;
pub mod version;
