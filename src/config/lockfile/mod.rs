//! Shrinkwrap lockfile (npm-shrinkwrap.json) parsing
//!
//! Reads the nested `dependencies` objects of a v1 shrinkwrap document into
//! an [`App`] tree. Only `name`, `version`, `from`, `resolved` and
//! `dependencies` are consumed; every other field is ignored.

mod serialization;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::domain::{App, DependencyNode, Resolution};
use crate::error::{Result, lockfile};
use crate::path_utils::is_module_name;
use serialization::deserialize_ordered;

/// Default lockfile name looked up in the project directory
pub const SHRINKWRAP_FILE: &str = "npm-shrinkwrap.json";

#[derive(Debug, Deserialize)]
struct RawShrinkwrap {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default, deserialize_with = "deserialize_ordered")]
    dependencies: Vec<(String, RawDependency)>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    #[serde(default)]
    version: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    resolved: Option<String>,
    #[serde(default, deserialize_with = "deserialize_ordered")]
    dependencies: Vec<(String, RawDependency)>,
}

/// Parse a shrinkwrap document from a reader.
///
/// `origin` only labels errors.
pub fn parse_app<R: Read>(reader: R, origin: &Path) -> Result<App> {
    let raw: RawShrinkwrap =
        serde_json::from_reader(reader).map_err(|e| lockfile::parse_failed(origin, e))?;

    let dependencies = convert_dependencies(raw.dependencies, origin)?;
    Ok(App::new(raw.name, raw.version).with_dependencies(dependencies))
}

/// Open and parse a shrinkwrap file
pub fn load_app(path: &Path) -> Result<App> {
    let file = File::open(path).map_err(|e| lockfile::parse_failed(path, e))?;
    parse_app(BufReader::new(file), path)
}

fn convert_dependencies(
    raw: Vec<(String, RawDependency)>,
    origin: &Path,
) -> Result<Vec<DependencyNode>> {
    raw.into_iter()
        .map(|(name, dependency)| convert_dependency(name, dependency, origin))
        .collect()
}

fn convert_dependency(name: String, raw: RawDependency, origin: &Path) -> Result<DependencyNode> {
    if !is_module_name(&name) {
        return Err(lockfile::parse_failed(
            origin,
            format!("invalid module name '{name}'"),
        ));
    }
    let resolution = Resolution::parse(raw.resolved.as_deref().unwrap_or_default())
        .map_err(|e| lockfile::parse_failed(origin, format!("{name}: {e}")))?;

    let mut node = DependencyNode::new(name, raw.version, resolution);
    node.from = raw.from;
    node.dependencies = convert_dependencies(raw.dependencies, origin)?;
    Ok(node)
}
