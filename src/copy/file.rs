//! Single file copy operations.
//!
//! This module copies one file's bytes to its destination and makes them
//! durable before returning.

use crate::error::{Error, Result};
use crate::options::BackupOptions;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::guard::ensure_outside;
use super::utils::{copy_file_contents, create_dir_all};

/// Result of a single file copy operation (internal use)
#[derive(Debug, Clone)]
pub(crate) struct FileCopyResult {
    /// Where the bytes were written, after directory redirection
    pub target: PathBuf,
    /// Number of bytes copied
    pub bytes: u64,
}

/// Copy a single file.
///
/// If `dst` is an existing directory, the file is copied into it under its
/// own name. An existing destination file is truncated and overwritten.
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `src` - Source file path
/// * `dst` - Destination file or directory path
/// * `options` - Backup options
///
/// # Returns
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if:
/// - `dst` is `src` or lies inside it ([`Error::NestedDestination`])
/// - Either path cannot be made absolute ([`Error::PathResolution`])
/// - `dst` cannot be inspected ([`Error::DestinationAccess`])
/// - Parent directories cannot be created ([`Error::DirectoryCreation`])
/// - `src` cannot be opened ([`Error::SourceOpen`])
/// - `dst` cannot be created ([`Error::DestinationCreate`])
/// - Reading or writing fails ([`Error::CopyStream`]); `dst` may be left partial
/// - The final flush fails ([`Error::Sync`])
pub fn copy_file(src: &Path, dst: &Path, options: &BackupOptions) -> Result<u64> {
    copy_file_internal(src, dst, options).map(|r| r.bytes)
}

/// Internal file copy that also reports the resolved destination.
/// Used by copy_dir to collect statistics.
pub(crate) fn copy_file_internal(
    src: &Path,
    dst: &Path,
    options: &BackupOptions,
) -> Result<FileCopyResult> {
    ensure_outside(src, dst)?;

    let target = resolve_target(src, dst)?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|source| Error::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let src_file = File::open(src).map_err(|source| Error::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    let dst_file = File::create(&target).map_err(|source| Error::DestinationCreate {
        path: target.clone(),
        source,
    })?;

    let bytes = copy_file_contents(&src_file, &dst_file).map_err(|source| Error::CopyStream {
        src: src.to_path_buf(),
        dst: target.clone(),
        source,
    })?;

    if options.fsync {
        dst_file.sync_all().map_err(|source| Error::Sync {
            path: target.clone(),
            source,
        })?;
    }

    Ok(FileCopyResult { target, bytes })
}

/// Where the copy of `src` lands when asked to write to `dst`.
///
/// An existing directory receives the file under its own name. The
/// redirected path is checked again, since `dir/file` copied into `dir`
/// would otherwise truncate itself.
fn resolve_target(src: &Path, dst: &Path) -> Result<PathBuf> {
    match fs::metadata(dst) {
        Ok(meta) if meta.is_dir() => match src.file_name() {
            Some(name) => {
                let target = dst.join(name);
                ensure_outside(src, &target)?;
                Ok(target)
            }
            None => Ok(dst.to_path_buf()),
        },
        Ok(_) => Ok(dst.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(dst.to_path_buf()),
        Err(source) => Err(Error::DestinationAccess {
            path: dst.to_path_buf(),
            source,
        }),
    }
}
