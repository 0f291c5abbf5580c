//! Path utilities for npm-unwrap
//!
//! Cache names must be safe single path segments, and paths taken from
//! archives or package.json must never escape the directory they are joined to.

use std::path::{Component, Path, PathBuf};

/// Characters that are unsafe in filesystem paths
/// Replaced with hyphens and collapsed: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a name safe to use as a single path segment.
///
/// Replaces unsafe characters (including `/`, `\`, and `:`) with hyphens.
/// Collapses consecutive hyphens into a single hyphen and removes leading/trailing hyphens.
/// Converts `@scope/pkg` -> `scope-pkg`.
/// Returns "unknown" if the result is empty.
///
/// # Examples
///
/// ```
/// use npm_unwrap::path_utils::make_path_safe;
///
/// assert_eq!(make_path_safe("@types/node"), "types-node");
/// assert_eq!(make_path_safe("feature/branch"), "feature-branch");
/// assert_eq!(make_path_safe(":::"), "unknown");
/// ```
pub fn make_path_safe(name: &str) -> String {
    let key: String = name
        .trim_start_matches('@')
        .chars()
        .map(|c| {
            if PATH_UNSAFE_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    let key = key
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if key.is_empty() || key == "." || key == ".." {
        "unknown".to_string()
    } else {
        key
    }
}

/// Lexically normalize a relative path, dropping `.` components.
///
/// Returns `None` if the path is empty, absolute, has a prefix, or climbs
/// above its starting point with `..`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use npm_unwrap::path_utils::contained_relative;
///
/// assert_eq!(contained_relative(Path::new("./bin/cli.js")), Some(PathBuf::from("bin/cli.js")));
/// assert_eq!(contained_relative(Path::new("lib/../cli.js")), Some(PathBuf::from("cli.js")));
/// assert_eq!(contained_relative(Path::new("../outside.js")), None);
/// ```
pub fn contained_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Whether a dependency name can be used as its directory under
/// `node_modules`: a single plain segment, or an `@scope/name` pair.
///
/// # Examples
///
/// ```
/// use npm_unwrap::path_utils::is_module_name;
///
/// assert!(is_module_name("left-pad"));
/// assert!(is_module_name("@types/node"));
/// assert!(!is_module_name(".."));
/// assert!(!is_module_name("lib/left-pad"));
/// ```
pub fn is_module_name(name: &str) -> bool {
    let plain = |segment: &str| {
        !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
    };
    let segments_ok = match name.split_once('/') {
        Some((scope, package)) => {
            scope.len() > 1 && scope.starts_with('@') && plain(scope) && plain(package)
        }
        None => plain(name),
    };

    segments_ok
        && Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Relative path from `from_dir` to `to`, computed without touching the filesystem.
///
/// Both paths must be expressed from the same base (both absolute, or both
/// relative to the same directory).
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use npm_unwrap::path_utils::relative_path;
///
/// assert_eq!(
///     relative_path(Path::new("/app/node_modules/.bin"), Path::new("/app/node_modules/mkdirp/bin/cmd.js")),
///     PathBuf::from("../mkdirp/bin/cmd.js")
/// );
/// ```
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target: Vec<Component<'_>> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
