//! Core copy operations.
//!
//! This module provides the containment guard, the single file copier, the
//! directory walker, and [`backup`], which picks between the last two.

mod dir;
mod file;
mod guard;
mod utils;
mod walk;

// Re-export public API
pub use dir::{BackupStats, copy_dir};
pub use file::copy_file;
pub use guard::ensure_outside;

use crate::error::{Error, Result};
use crate::options::BackupOptions;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Back up `src` to `dst`.
///
/// Directories are copied with [`copy_dir`], anything else with
/// [`copy_file`]. The source is inspected once, following symlinks.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] or [`Error::SourceAccess`] if `src`
/// cannot be inspected, otherwise whatever the chosen copier returns.
///
/// # Example
///
/// ```no_run
/// use bkp::{backup, BackupOptions};
/// use std::path::Path;
///
/// let stats = backup(Path::new("mydata"), Path::new("backup"), &BackupOptions::default())?;
/// println!("Backed up {} files", stats.files_copied);
/// # Ok::<(), bkp::Error>(())
/// ```
pub fn backup(src: &Path, dst: &Path, options: &BackupOptions) -> Result<BackupStats> {
    let src_meta =
        fs::metadata(src).map_err(|source| Error::source_stat(src.to_path_buf(), source))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        is_dir = src_meta.is_dir(),
        "starting backup"
    );

    if src_meta.is_dir() {
        return copy_dir(src, dst, options);
    }

    let start = Instant::now();
    let bytes = copy_file(src, dst, options)?;
    Ok(BackupStats {
        files_copied: 1,
        bytes_copied: bytes,
        duration: start.elapsed(),
        ..BackupStats::default()
    })
}
