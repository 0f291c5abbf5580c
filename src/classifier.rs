//! Dependency classification
//!
//! Flattens a resolved tree into the work lists of the fetch stage: tarball
//! locators (sorted, deduplicated by exact string) and git checkouts (one per
//! node, in tree order). Nodes without a resolution are reported and skipped,
//! but their children are still classified.

use crate::domain::{DependencyNode, DependencyTree, GitLocator, Resolution};

/// One git checkout to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryJob {
    pub name: String,
    pub version: String,
    pub locator: GitLocator,
}

/// Output of [`classify`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Tarball locators, sorted and unique
    pub tarballs: Vec<String>,
    /// Git checkouts in pre-order
    pub repositories: Vec<RepositoryJob>,
    /// `name@version` of every node without a resolution
    pub unresolved: Vec<String>,
}

impl FetchPlan {
    pub fn is_empty(&self) -> bool {
        self.tarballs.is_empty() && self.repositories.is_empty()
    }
}

/// Walk the tree depth-first (pre-order) and build the fetch plan
pub fn classify<T: DependencyTree + ?Sized>(tree: &T) -> FetchPlan {
    let mut plan = FetchPlan::default();
    collect(tree.dependencies(), &mut plan);

    plan.tarballs.sort();
    plan.tarballs.dedup();

    tracing::debug!(
        "Classified {} tarball(s), {} git dependency(ies), {} unresolved",
        plan.tarballs.len(),
        plan.repositories.len(),
        plan.unresolved.len()
    );
    plan
}

fn collect(nodes: &[DependencyNode], plan: &mut FetchPlan) {
    for node in nodes {
        match &node.resolution {
            Resolution::Unresolved => {
                tracing::warn!("Empty resolved field for {}", node.id());
                plan.unresolved.push(node.id());
            }
            Resolution::Git(locator) => plan.repositories.push(RepositoryJob {
                name: node.name.clone(),
                version: node.version.clone(),
                locator: locator.clone(),
            }),
            Resolution::Tarball(url) => plan.tarballs.push(url.clone()),
        }

        collect(&node.dependencies, plan);
    }
}
