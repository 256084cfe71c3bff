//! Lazy depth-first traversal of a source tree.
//!
//! [`Walk`] yields every entry below a root as a [`WalkEntry`], each
//! directory before anything inside it. Directories are opened one at a
//! time on an explicit stack, so memory grows with depth rather than with
//! the size of the tree.

use crate::error::{Error, Result};
use std::fs::{self, DirEntry, ReadDir};
use std::path::{Path, PathBuf};

use super::utils::{DirKey, get_dir_key};

/// What a walk entry is, as far as the copier cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Dir,
    File,
    /// A symlink that was not followed, or whose target is missing
    Symlink,
    /// Sockets, FIFOs, device nodes
    Other,
}

#[derive(Debug)]
pub(crate) struct WalkEntry {
    /// Full source path of the entry
    pub path: PathBuf,
    /// Path relative to the walk root; empty for the root itself
    pub relative: PathBuf,
    pub kind: EntryKind,
}

struct Frame {
    entries: ReadDir,
    path: PathBuf,
    relative: PathBuf,
    key: DirKey,
}

/// A directory that followed symlinks must not lead into or above.
struct Fence {
    path: PathBuf,
    resolved: Option<PathBuf>,
}

pub(crate) struct Walk {
    root: Option<PathBuf>,
    follow_symlinks: bool,
    fence: Option<Fence>,
    stack: Vec<Frame>,
}

impl Walk {
    pub(crate) fn new(root: &Path, follow_symlinks: bool) -> Self {
        Self {
            root: Some(root.to_path_buf()),
            follow_symlinks,
            fence: None,
            stack: Vec::new(),
        }
    }

    /// Refuse to follow any symlink that resolves into `dir`, to `dir`
    /// itself, or to one of its ancestors.
    ///
    /// The copier passes its destination here, so a followed link can never
    /// make the walk read the tree it is writing.
    pub(crate) fn fenced_off(mut self, dir: &Path) -> Self {
        self.fence = Some(Fence {
            path: dir.to_path_buf(),
            resolved: None,
        });
        self
    }

    fn root_entry(&mut self, root: PathBuf) -> Result<WalkEntry> {
        let meta =
            fs::metadata(&root).map_err(|source| Error::source_stat(root.clone(), source))?;
        if meta.is_dir() {
            self.descend(root, PathBuf::new())
        } else {
            Ok(WalkEntry {
                path: root,
                relative: PathBuf::new(),
                kind: EntryKind::File,
            })
        }
    }

    /// Open a directory and push it so its children come next.
    fn descend(&mut self, path: PathBuf, relative: PathBuf) -> Result<WalkEntry> {
        let key = get_dir_key(&path).map_err(|source| Error::SourceAccess {
            path: path.clone(),
            source,
        })?;
        // Only ancestors count: two links to the same directory are not a loop
        if self.stack.iter().any(|frame| frame.key == key) {
            return Err(Error::SymlinkLoop(path));
        }

        let entries = fs::read_dir(&path).map_err(|source| Error::SourceAccess {
            path: path.clone(),
            source,
        })?;
        self.stack.push(Frame {
            entries,
            path: path.clone(),
            relative: relative.clone(),
            key,
        });

        Ok(WalkEntry {
            path,
            relative,
            kind: EntryKind::Dir,
        })
    }

    fn classify(&mut self, entry: &DirEntry, relative: PathBuf) -> Result<WalkEntry> {
        let path = entry.path();
        // file_type() does not follow symlinks
        let file_type = entry.file_type().map_err(|source| Error::SourceAccess {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            return self.descend(path, relative);
        }

        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) if self.follow_symlinks && (target.is_dir() || target.is_file()) => {
                    self.check_fence(&path)?;
                    if target.is_dir() {
                        return self.descend(path, relative);
                    }
                    EntryKind::File
                }
                Ok(_) if self.follow_symlinks => EntryKind::Other,
                _ => EntryKind::Symlink,
            }
        } else {
            EntryKind::Other
        };

        Ok(WalkEntry {
            path,
            relative,
            kind,
        })
    }

    fn check_fence(&mut self, link: &Path) -> Result<()> {
        let Some(fence) = self.fence.as_mut() else {
            return Ok(());
        };
        // The destination usually exists only once the root entry was copied
        if fence.resolved.is_none() {
            fence.resolved = fs::canonicalize(&fence.path).ok();
        }
        let Some(resolved) = fence.resolved.as_deref() else {
            return Ok(());
        };

        let target = fs::canonicalize(link).map_err(|source| Error::SourceAccess {
            path: link.to_path_buf(),
            source,
        })?;
        if target.starts_with(resolved) || resolved.starts_with(&target) {
            return Err(Error::NestedDestination {
                src: link.to_path_buf(),
                dst: fence.path.clone(),
            });
        }
        Ok(())
    }
}

impl Iterator for Walk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            return Some(self.root_entry(root));
        }

        loop {
            let frame = self.stack.last_mut()?;
            match frame.entries.next() {
                Some(Ok(entry)) => {
                    let relative = frame.relative.join(entry.file_name());
                    return Some(self.classify(&entry, relative));
                }
                Some(Err(source)) => {
                    return Some(Err(Error::SourceAccess {
                        path: frame.path.clone(),
                        source,
                    }));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
