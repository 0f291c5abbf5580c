//! Installed module metadata (package.json)
//!
//! Only the fields the lifecycle and link stages need are read: `name`,
//! `scripts.install` and `bin`. Every field is optional.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, fs as fs_error, lockfile};

/// Package metadata file inside a module directory
pub const PACKAGE_JSON: &str = "package.json";

/// Presence of this file means the module needs a native build
pub const NATIVE_BUILD_FILE: &str = "binding.gyp";

/// What an installed module declares about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMetadata {
    /// `name` field, if present
    pub name: Option<String>,
    /// Non-empty `scripts.install`
    pub has_install_hook: bool,
    /// `binding.gyp` exists in the module directory
    pub native_build: bool,
    /// Link name to script path relative to the module directory
    pub executables: BTreeMap<String, String>,
}

impl ModuleMetadata {
    /// Whether the package manager must run the install step
    pub fn needs_install_step(&self) -> bool {
        self.has_install_hook || self.native_build
    }
}

/// Reads [`ModuleMetadata`] for an installed module
pub trait MetadataReader: Sync {
    /// `fallback_name` is the tree node's name, used when `name` is missing.
    fn read(&self, module_dir: &Path, fallback_name: &str) -> Result<ModuleMetadata>;
}

/// Reads `package.json` from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageJsonReader;

impl MetadataReader for PackageJsonReader {
    fn read(&self, module_dir: &Path, fallback_name: &str) -> Result<ModuleMetadata> {
        let native_build = module_dir.join(NATIVE_BUILD_FILE).is_file();
        let path = module_dir.join(PACKAGE_JSON);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No {} in {}", PACKAGE_JSON, module_dir.display());
                return Ok(ModuleMetadata {
                    native_build,
                    ..ModuleMetadata::default()
                });
            }
            Err(e) => return Err(fs_error::read_failed(&path, e)),
        };

        let json: Value =
            serde_json::from_str(&contents).map_err(|e| lockfile::metadata_failed(&path, e))?;

        let mut metadata = parse_metadata(&json, fallback_name);
        metadata.native_build = native_build;
        Ok(metadata)
    }
}

/// Extract metadata fields from a parsed package.json value
pub fn parse_metadata(json: &Value, fallback_name: &str) -> ModuleMetadata {
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let has_install_hook = json
        .get("scripts")
        .and_then(|scripts| scripts.get("install"))
        .and_then(Value::as_str)
        .is_some_and(|script| !script.trim().is_empty());

    let bin_owner = name.as_deref().unwrap_or(fallback_name);
    let executables = json
        .get("bin")
        .map(|bin| parse_bin(bin, bin_owner))
        .unwrap_or_default();

    ModuleMetadata {
        name,
        has_install_hook,
        native_build: false,
        executables,
    }
}

fn parse_bin(bin: &Value, package_name: &str) -> BTreeMap<String, String> {
    let mut executables = BTreeMap::new();
    match bin {
        Value::String(script) => {
            executables.insert(unscoped(package_name).to_string(), script.clone());
        }
        Value::Object(entries) => {
            for (link, script) in entries {
                match script.as_str() {
                    Some(script) => {
                        executables.insert(link.clone(), script.to_string());
                    }
                    None => tracing::warn!(
                        "Ignoring bin entry '{}' of {}: script path is not a string",
                        link,
                        package_name
                    ),
                }
            }
        }
        Value::Null => {}
        _ => tracing::warn!("Ignoring malformed bin field of {}", package_name),
    }
    executables
}

/// `@scope/name` -> `name`
fn unscoped(package_name: &str) -> &str {
    package_name
        .rsplit_once('/')
        .map_or(package_name, |(_, name)| name)
}
