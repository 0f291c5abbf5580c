//! Copying a cached git checkout into the install tree

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Names never copied out of a checkout
const EXCLUDED: &[&str] = &[".git", ".gitignore"];

/// Copy the working tree at `src` into `dst`, leaving out git metadata.
///
/// File permissions are kept. Returns the number of files copied.
pub fn copy_working_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).map_err(|e| fs_error::write_failed(dst, e))?;
    let mut copied = 0;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !EXCLUDED.contains(&name))
        });

    for entry in walker {
        let entry = entry.map_err(|e| fs_error::read_failed(src, e))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| fs_error::read_failed(entry.path(), e))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_error::write_failed(&target, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| fs_error::write_failed(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let link = fs::read_link(src).map_err(|e| fs_error::read_failed(src, e))?;
    std::os::unix::fs::symlink(&link, dst).map_err(|e| fs_error::write_failed(dst, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dst: &Path) -> Result<()> {
    tracing::warn!("Skipping symlink {}", src.display());
    Ok(())
}
