//! Lexical path helpers.
//!
//! Containment checks compare paths as written, without touching the
//! filesystem: a destination that does not exist yet must still be
//! comparable against its source.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and remove `.` and
/// `..` components lexically.
///
/// Fails when the current directory cannot be determined or the path is
/// empty.
pub(crate) fn absolute_clean(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(clean(&absolute))
}

/// Lexically normalize a path.
///
/// `..` directly under the root is dropped, so `/..` cleans to `/`. Leading
/// `..` in a relative path are kept.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Relative path that leads from `base` to `target`.
///
/// Both paths must already be cleaned. Returns `None` when no such path
/// exists: one path is rooted and the other is not, they sit under
/// different Windows prefixes, or `base` has unresolvable `..` left over.
/// An empty result means the two paths are the same.
pub(crate) fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    if base.has_root() != target.has_root() || prefix_of(base) != prefix_of(target) {
        return None;
    }

    let base: Vec<Component<'_>> = base.components().filter(is_segment).collect();
    let target: Vec<Component<'_>> = target.components().filter(is_segment).collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(b, t)| b == t)
        .count();

    let mut relative = PathBuf::new();
    for component in &base[common..] {
        if matches!(component, Component::ParentDir) {
            return None;
        }
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

/// Whether a relative path begins by stepping up out of its base.
pub(crate) fn starts_with_parent(relative: &Path) -> bool {
    matches!(relative.components().next(), Some(Component::ParentDir))
}

fn prefix_of(path: &Path) -> Option<Component<'_>> {
    path.components()
        .next()
        .filter(|c| matches!(c, Component::Prefix(_)))
}

fn is_segment(component: &Component<'_>) -> bool {
    matches!(component, Component::Normal(_) | Component::ParentDir)
}
