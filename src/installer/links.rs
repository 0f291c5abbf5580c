//! Executable links in `node_modules/.bin`

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::BIN_DIR;
use crate::error::{Result, fs as fs_error};
use crate::path_utils::{contained_relative, relative_path};

/// Counts from linking one module's executables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    pub created: usize,
    /// Links left alone because the name was already taken
    pub collisions: usize,
}

/// Link every declared executable of the module `name`, installed in
/// `modules_dir`, into `modules_dir/.bin`.
///
/// Each link is relative (`../<name>/<script>`) so the tree can be moved.
/// An existing link with the same name wins and is reported as a collision.
pub fn link_executables(
    modules_dir: &Path,
    name: &str,
    executables: &BTreeMap<String, String>,
) -> Result<LinkOutcome> {
    let mut outcome = LinkOutcome::default();
    if executables.is_empty() {
        return Ok(outcome);
    }

    let module_dir = modules_dir.join(name);
    let bin_dir = modules_dir.join(BIN_DIR);

    for (link_name, script) in executables {
        if !is_valid_link_name(link_name) {
            tracing::warn!("Ignoring bin entry '{}' of {}: invalid link name", link_name, name);
            continue;
        }
        let Some(script) = contained_relative(Path::new(script)) else {
            tracing::warn!(
                "Ignoring bin entry '{}' of {}: script path '{}' leaves the module",
                link_name,
                name,
                script
            );
            continue;
        };

        let script_path = module_dir.join(&script);
        if !script_path.is_file() {
            tracing::warn!(
                "Ignoring bin entry '{}' of {}: {} does not exist",
                link_name,
                name,
                script_path.display()
            );
            continue;
        }
        make_executable(&script_path)?;

        fs::create_dir_all(&bin_dir).map_err(|e| fs_error::write_failed(&bin_dir, e))?;
        let link_path = bin_dir.join(link_name);
        if fs::symlink_metadata(&link_path).is_ok() {
            tracing::warn!("{} already exists, not linking {}", link_path.display(), name);
            outcome.collisions += 1;
            continue;
        }

        let target = relative_path(&bin_dir, &script_path);
        match create_symlink(&target, &link_path) {
            Ok(()) => {
                tracing::debug!("Linked {} -> {}", link_path.display(), target.display());
                outcome.created += 1;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!("{} already exists, not linking {}", link_path.display(), name);
                outcome.collisions += 1;
            }
            Err(e) => return Err(fs_error::write_failed(&link_path, e)),
        }
    }

    Ok(outcome)
}

fn is_valid_link_name(link_name: &str) -> bool {
    !link_name.is_empty()
        && link_name != "."
        && !link_name.contains("..")
        && !link_name.contains(['/', '\\'])
}

/// Add execute permission wherever read permission is set
#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|e| fs_error::read_failed(path, e))?
        .permissions()
        .mode();
    let executable = mode | ((mode & 0o444) >> 2);
    if executable != mode {
        fs::set_permissions(path, fs::Permissions::from_mode(executable))
            .map_err(|e| fs_error::write_failed(path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
