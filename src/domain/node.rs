//! Dependency tree types
//!
//! The tree is a materialized install layout, not a dependency graph: the same
//! `name@version` may appear at several positions, and nesting reflects where
//! a module is installed.

use std::fmt::Write as _;

use super::locator::Resolution;

/// Anything that owns an ordered list of dependencies
pub trait DependencyTree {
    fn dependencies(&self) -> &[DependencyNode];
}

/// Root of a resolved tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<DependencyNode>,
}

/// One resolved module at one install position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    pub version: String,
    /// Requested range or spec (`from` in the lockfile)
    pub from: Option<String>,
    pub resolution: Resolution,
    pub dependencies: Vec<DependencyNode>,
}

impl App {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<DependencyNode>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Total number of nodes below the root
    pub fn module_count(&self) -> usize {
        count_nodes(&self.dependencies)
    }

    /// Render the tree as `name @ version` lines, indented with dashes per level.
    pub fn render_tree(&self) -> String {
        let mut out = format!("{} @ {}\n", self.name, self.version);
        render_level(&self.dependencies, 2, &mut out);
        out
    }
}

impl DependencyNode {
    pub fn new(name: impl Into<String>, version: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            from: None,
            resolution,
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<DependencyNode>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// `name@version`, used in log lines and error messages
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

impl DependencyTree for App {
    fn dependencies(&self) -> &[DependencyNode] {
        &self.dependencies
    }
}

impl DependencyTree for DependencyNode {
    fn dependencies(&self) -> &[DependencyNode] {
        &self.dependencies
    }
}

fn count_nodes(nodes: &[DependencyNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_nodes(&node.dependencies))
        .sum()
}

fn render_level(nodes: &[DependencyNode], indent: usize, out: &mut String) {
    for node in nodes {
        let _ = writeln!(out, "{} {} @ {}", "-".repeat(indent), node.name, node.version);
        render_level(&node.dependencies, indent + 2, out);
    }
}
