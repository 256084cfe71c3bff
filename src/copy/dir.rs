//! Directory copy operations.
//!
//! This module copies a directory tree entry by entry, recreating each
//! directory before anything is written into it.

use crate::error::{Error, Result};
use crate::options::{BackupOptions, SymlinkPolicy};
use std::path::Path;
use std::time::Instant;

use super::file::copy_file_internal;
use super::guard::ensure_outside;
use super::utils::create_dir_all;
use super::walk::{EntryKind, Walk};

/// Statistics from a backup.
///
/// Returned by [`copy_dir`] and [`backup`](crate::backup) to report what
/// was written.
///
/// # Example
///
/// ```no_run
/// use bkp::{copy_dir, BackupOptions};
/// use std::path::Path;
///
/// let stats = copy_dir(Path::new("src"), Path::new("dst"), &BackupOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), bkp::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of directories created (already existing ones are not counted)
    pub dirs_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Symlinks and special files left out of the backup
    pub entries_skipped: u64,
    /// Duration of the backup
    pub duration: std::time::Duration,
}

/// Copy a directory tree recursively.
///
/// Every directory under `src` is recreated under `dst` and every file is
/// copied with [`copy_file`](crate::copy_file). Existing directories are
/// reused and existing files overwritten, so running the same backup twice
/// is safe. The first failure aborts the walk; whatever was copied before it
/// stays on disk.
///
/// If `src` is a file rather than a directory it is copied to `dst` as
/// [`copy_file`](crate::copy_file) would.
///
/// # Arguments
///
/// * `src` - Source directory path
/// * `dst` - Destination directory path
/// * `options` - Backup options
///
/// # Errors
///
/// Returns an error if:
/// - `dst` is `src` or lies inside it ([`Error::NestedDestination`])
/// - Source does not exist ([`Error::SourceNotFound`])
/// - A source directory cannot be read ([`Error::SourceAccess`])
/// - A destination directory cannot be created ([`Error::DirectoryCreation`])
/// - A file fails to copy ([`Error::Entry`], wrapping the file error)
/// - A followed symlink loops back on itself ([`Error::SymlinkLoop`])
/// - A followed symlink resolves into `dst` or one of its ancestors
///   ([`Error::NestedDestination`], naming the link)
/// - A symlink is met under [`SymlinkPolicy::Error`] ([`Error::SymlinkRejected`])
pub fn copy_dir(src: &Path, dst: &Path, options: &BackupOptions) -> Result<BackupStats> {
    let start_time = Instant::now();

    // Every target below is dst joined with a path relative to src, so one
    // check covers the whole walk
    ensure_outside(src, dst)?;

    let mut stats = BackupStats::default();
    let follow = options.symlinks == SymlinkPolicy::Follow;

    for entry in Walk::new(src, follow).fenced_off(dst) {
        let entry = entry?;
        let target = if entry.relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(&entry.relative)
        };

        match entry.kind {
            EntryKind::Dir => {
                let existed = target.is_dir();
                create_dir_all(&target).map_err(|source| Error::DirectoryCreation {
                    path: target.clone(),
                    source,
                })?;
                if !existed {
                    stats.dirs_created += 1;
                    options.verbose(&format!("created {}", target.display()));
                }
            }
            EntryKind::File => {
                let result = copy_file_internal(&entry.path, &target, options).map_err(|e| {
                    Error::Entry {
                        path: entry.path.clone(),
                        source: Box::new(e),
                    }
                })?;
                stats.files_copied += 1;
                stats.bytes_copied += result.bytes;
                options.verbose(&format!(
                    "copied {} -> {} ({} bytes)",
                    entry.path.display(),
                    result.target.display(),
                    result.bytes
                ));
            }
            EntryKind::Symlink => match options.symlinks {
                SymlinkPolicy::Error => return Err(Error::SymlinkRejected(entry.path)),
                SymlinkPolicy::Follow => {
                    options.warn(&format!("Skipping broken symlink {}", entry.path.display()));
                    stats.entries_skipped += 1;
                }
                SymlinkPolicy::Skip => {
                    options.warn(&format!("Skipping symlink {}", entry.path.display()));
                    stats.entries_skipped += 1;
                }
            },
            EntryKind::Other => {
                options.warn(&format!("Skipping special file: {}", entry.path.display()));
                stats.entries_skipped += 1;
            }
        }
    }

    stats.duration = start_time.elapsed();
    Ok(stats)
}
