//! Package archive extraction
//!
//! npm tarballs wrap every file in a single top-level directory (usually
//! `package/`). Extraction drops that first segment so the contents land
//! directly in the module directory.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::{Archive, Entry, EntryType};

use crate::error::{Result, fetch};
use crate::path_utils::contained_relative;

/// What an extraction wrote and what it refused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Regular files written
    pub files: usize,
    /// Entries skipped with a warning
    pub skipped: usize,
}

/// Extract a gzip-compressed tarball from disk into `dest`
pub fn extract_file(archive: &Path, dest: &Path) -> Result<ExtractReport> {
    let file = File::open(archive).map_err(|e| fetch::archive_failed(archive, e))?;
    unpack(file, dest).map_err(|e| fetch::archive_failed(archive, e))
}

/// Extract a gzip-compressed tar stream into `dest`
pub fn extract<R: Read>(reader: R, dest: &Path) -> Result<ExtractReport> {
    unpack(reader, dest).map_err(|e| fetch::archive_failed(dest, e))
}

fn unpack<R: Read>(reader: R, dest: &Path) -> io::Result<ExtractReport> {
    fs::create_dir_all(dest)?;

    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut report = ExtractReport::default();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

        match entry.header().entry_type() {
            EntryType::Directory
            | EntryType::XGlobalHeader
            | EntryType::XHeader
            | EntryType::GNULongName
            | EntryType::GNULongLink => continue,
            EntryType::Regular | EntryType::Continuous => {}
            EntryType::Symlink | EntryType::Link => {
                tracing::warn!("Skipping link entry {}", name);
                report.skipped += 1;
                continue;
            }
            other => {
                tracing::warn!("Skipping unsupported entry {} ({:?})", name, other);
                report.skipped += 1;
                continue;
            }
        }

        let Some(relative) = strip_first_segment(&name) else {
            tracing::warn!("Skipping invalid entry {}", name);
            report.skipped += 1;
            continue;
        };

        write_entry(&mut entry, &dest.join(relative))?;
        report.files += 1;
    }

    tracing::debug!(
        "Extracted {} file(s) into {} ({} skipped)",
        report.files,
        dest.display(),
        report.skipped
    );
    Ok(report)
}

/// `package/lib/a.js` -> `lib/a.js`.
///
/// `None` for a bare top-level name or a remainder that would leave the
/// destination directory.
fn strip_first_segment(name: &str) -> Option<std::path::PathBuf> {
    let (_, remainder) = name.split_once('/')?;
    contained_relative(Path::new(remainder))
}

fn write_entry<R: Read>(entry: &mut Entry<'_, R>, target: &Path) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::symlink_metadata(target).is_ok_and(|meta| meta.file_type().is_symlink()) {
        fs::remove_file(target)?;
    }

    let mut out = File::create(target)?;
    io::copy(entry, &mut out)?;

    #[cfg(unix)]
    if let Ok(mode) = entry.header().mode() {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777))?;
    }

    Ok(())
}
