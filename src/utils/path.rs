//! Path normalization utilities.
//!
//! Pure functions, no filesystem access:
//! - `expand_tilde` - `~` expansion for user-supplied paths
//! - `normalize_path` - absolute, lexically normalized form
//! - `is_same_or_ancestor` - ancestry check between two paths

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the home directory.
///
/// Paths that are not valid UTF-8 are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Normalize a path to absolute form without touching the filesystem.
///
/// Relative paths are joined onto `base`. `.` components and trailing
/// separators disappear, `..` pops the previous component (never past the
/// root). An empty path normalizes to `base` itself.
///
/// The result is only absolute when `base` is; with a relative base, leading
/// `..` components are kept rather than dropped.
///
/// # Example
/// ```ignore
/// normalize_path(Path::new("site/./docs/"), Path::new("/proj"))  // -> /proj/site/docs
/// normalize_path(Path::new(""), Path::new("/proj"))              // -> /proj
/// ```
pub fn normalize_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// True when `ancestor` equals `path` or contains it.
///
/// Both sides are expected to be normalized already; comparison is
/// component-wise so `/site` is not an ancestor of `/site-docs`.
#[inline]
pub fn is_same_or_ancestor(ancestor: &Path, path: &Path) -> bool {
    path.starts_with(ancestor)
}
