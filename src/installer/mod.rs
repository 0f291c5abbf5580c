//! Recursive installation of a fetched tree
//!
//! This module handles:
//! - Placing each module at `<parent>/node_modules/<name>`, nested the same
//!   way as the lockfile
//! - Extracting cached tarballs and copying cached git checkouts
//! - Running install scripts once a module's own dependencies are in place
//! - Linking declared executables into the level's `.bin` directory
//!
//! Everything here is sequential and depth-first. The fetch stage must have
//! filled the cache beforehand; nothing is downloaded.

pub mod copy;
pub mod lifecycle;
pub mod links;


use std::fs;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::cache::Cache;
use crate::config::{MODULES_DIR, MetadataReader, PackageJsonReader, Settings};
use crate::domain::{App, DependencyNode, Resolution};
use crate::error::{Result, fetch, fs as fs_error, lockfile};
use crate::path_utils::is_module_name;

pub use lifecycle::{NpmCli, PackageManager};
pub use links::LinkOutcome;

/// Where a module got to during installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleState {
    Pending,
    /// Artifact located in the cache
    Fetched,
    /// Artifact unpacked or copied into the module directory
    Extracted,
    ChildrenInstalled,
    HookRun,
    Linked,
    Done,
    /// No resolution and no fallback artifact; only its children were installed
    Unresolved,
}

/// Final state of one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledModule {
    /// `name@version`
    pub id: String,
    pub path: PathBuf,
    pub state: ModuleState,
}

/// Outcome of [`Installer::install`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Modules in completion order: every module appears after its children
    pub modules: Vec<InstalledModule>,
    pub hooks_run: usize,
    pub links_created: usize,
    pub link_collisions: usize,
}

impl InstallReport {
    /// Modules that ended up [`ModuleState::Unresolved`]
    pub fn unresolved(&self) -> impl Iterator<Item = &InstalledModule> {
        self.modules
            .iter()
            .filter(|module| module.state == ModuleState::Unresolved)
    }

    pub fn installed_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|module| module.state == ModuleState::Done)
            .count()
    }
}

/// Installs an [`App`] from a populated [`Cache`]
pub struct Installer {
    package_manager: Box<dyn PackageManager>,
    metadata: Box<dyn MetadataReader>,
    run_scripts: bool,
}

impl Installer {
    pub fn new(
        package_manager: Box<dyn PackageManager>,
        metadata: Box<dyn MetadataReader>,
    ) -> Self {
        Self {
            package_manager,
            metadata,
            run_scripts: true,
        }
    }

    /// npm from `settings`, metadata from package.json files
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Box::new(NpmCli::new(&settings.npm_bin)),
            Box::new(PackageJsonReader),
        )
        .with_scripts(!settings.ignore_scripts)
    }

    /// Whether install scripts run at all
    #[must_use]
    pub fn with_scripts(mut self, run_scripts: bool) -> Self {
        self.run_scripts = run_scripts;
        self
    }

    /// Install every module of `app` below `destination_root/node_modules`
    pub fn install(
        &self,
        app: &App,
        cache: &Cache,
        destination_root: &Path,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        if app.dependencies.is_empty() {
            tracing::info!("{} has no dependencies", app.name);
            return Ok(report);
        }

        let modules_dir = destination_root.join(MODULES_DIR);
        fs::create_dir_all(&modules_dir).map_err(|e| fs_error::write_failed(&modules_dir, e))?;

        for node in &app.dependencies {
            self.install_node(node, &modules_dir, cache, &mut report)?;
        }

        tracing::info!(
            "Installed {} module(s) into {}",
            report.installed_count(),
            modules_dir.display()
        );
        Ok(report)
    }

    fn install_node(
        &self,
        node: &DependencyNode,
        modules_dir: &Path,
        cache: &Cache,
        report: &mut InstallReport,
    ) -> Result<()> {
        if !is_module_name(&node.name) {
            return Err(lockfile::invalid_module_name(&node.name));
        }
        let module_dir = modules_dir.join(&node.name);
        let mut progress = Progress::new(node.id());
        place_artifact(node, &module_dir, cache, &mut progress)?;

        if node.has_dependencies() {
            let nested = module_dir.join(MODULES_DIR);
            fs::create_dir_all(&nested).map_err(|e| fs_error::write_failed(&nested, e))?;
            for child in &node.dependencies {
                self.install_node(child, &nested, cache, report)?;
            }
        }

        if progress.state != ModuleState::Unresolved {
            progress.advance(ModuleState::ChildrenInstalled);
            let metadata = self.metadata.read(&module_dir, &node.name)?;

            if metadata.needs_install_step() {
                if self.run_scripts {
                    self.package_manager.run_install(&progress.id, &module_dir)?;
                    report.hooks_run += 1;
                } else {
                    tracing::debug!("Skipping install script of {}", progress.id);
                }
            }
            progress.advance(ModuleState::HookRun);

            let links = links::link_executables(modules_dir, &node.name, &metadata.executables)?;
            report.links_created += links.created;
            report.link_collisions += links.collisions;
            progress.advance(ModuleState::Linked);

            progress.advance(ModuleState::Done);
        }

        report.modules.push(InstalledModule {
            id: progress.id,
            path: module_dir,
            state: progress.state,
        });
        Ok(())
    }
}

/// State of the module currently being installed
struct Progress {
    id: String,
    state: ModuleState,
}

impl Progress {
    fn new(id: String) -> Self {
        Self {
            id,
            state: ModuleState::Pending,
        }
    }

    fn advance(&mut self, next: ModuleState) {
        tracing::trace!("{}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
    }
}

/// Put the node's cached artifact into `module_dir`, replacing whatever was
/// there. Leaves `progress` at `Extracted`, or `Unresolved` when there is
/// nothing to place.
fn place_artifact(
    node: &DependencyNode,
    module_dir: &Path,
    cache: &Cache,
    progress: &mut Progress,
) -> Result<()> {
    match &node.resolution {
        Resolution::Tarball(locator) => {
            let tarball = cache.tarball_path(locator)?;
            if !tarball.is_file() {
                return Err(fetch::artifact_missing(&progress.id, &tarball));
            }
            progress.advance(ModuleState::Fetched);
            clear_module_dir(module_dir)?;
            archive::extract_file(&tarball, module_dir)?;
        }
        Resolution::Git(locator) => {
            let checkout = cache.repository_path(&node.name, &locator.revision);
            if !checkout.is_dir() {
                return Err(fetch::artifact_missing(&progress.id, &checkout));
            }
            progress.advance(ModuleState::Fetched);
            clear_module_dir(module_dir)?;
            copy::copy_working_tree(&checkout, module_dir)?;
        }
        Resolution::Unresolved => {
            let fallback = cache.fallback_tarball_path(&node.name, &node.version);
            if !fallback.is_file() {
                tracing::warn!(
                    "No artifact for {} (expected {}), installing its dependencies only",
                    progress.id,
                    fallback.display()
                );
                progress.advance(ModuleState::Unresolved);
                return Ok(());
            }
            tracing::debug!("Using {} for unresolved {}", fallback.display(), progress.id);
            progress.advance(ModuleState::Fetched);
            clear_module_dir(module_dir)?;
            archive::extract_file(&fallback, module_dir)?;
        }
    }

    progress.advance(ModuleState::Extracted);
    Ok(())
}

/// Remove a previous install of a module, whatever it was
fn clear_module_dir(module_dir: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(module_dir) else {
        return Ok(());
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(module_dir)
    } else {
        fs::remove_file(module_dir)
    };
    removed.map_err(|e| fs_error::write_failed(module_dir, e))
}
