//! Utility functions for backup operations.
//!
//! This module contains helpers shared by the file and directory copiers:
//! content streaming, directory creation, and directory identity for loop
//! detection.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Copy all remaining contents of `src` into `dst`.
///
/// On Linux 4.5+, uses `copy_file_range` for zero-copy kernel-to-kernel transfer.
/// Falls back to `std::io::copy` on other platforms or when the kernel
/// refuses the file pair.
pub(crate) fn copy_file_contents(src: &File, dst: &File) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        let len = src.metadata()?.len();
        // procfs and friends report a zero length for files that have content
        if len > 0 {
            return copy_file_range_all(src, dst, len);
        }
    }
    io::copy(&mut BufReader::new(src), &mut &*dst)
}

/// Linux-specific: copy using copy_file_range(2) syscall.
///
/// Falls back to io::copy if copy_file_range fails before any byte moved
/// (e.g., cross-filesystem). Data appended after `len` was sampled is picked
/// up by a final userspace pass.
#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut remaining = len;
    let mut copied: u64 = 0;

    while remaining > 0 {
        // 128MB chunks keep each syscall bounded
        let chunk_size = remaining.min(128 * 1024 * 1024) as usize;

        // SAFETY: both descriptors are open for the lifetime of the borrows,
        // and null offsets make the kernel use and advance the file positions
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                chunk_size,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            // EXDEV: cross-device, ENOSYS: not supported, EINVAL: fs doesn't support it
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EOPNOTSUPP)
                )
            {
                return io::copy(&mut BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            // EOF reached early (file was truncated meanwhile)
            return Ok(copied);
        }

        let bytes_copied = result as u64;
        copied += bytes_copied;
        remaining = remaining.saturating_sub(bytes_copied);
    }

    let tail = io::copy(&mut BufReader::new(src), &mut &*dst)?;
    Ok(copied + tail)
}

/// Create `path` and any missing ancestors with mode 0755 (before umask).
///
/// Succeeds if the directory already exists.
pub(crate) fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Identity of a directory, used to detect symlink loops.
pub(crate) type DirKey = (u64, u64);

/// Get a unique key for a directory based on device and inode.
///
/// Follows symlinks, so a link and its target share a key.
/// On non-Unix, falls back to a hash of the canonical path.
#[cfg(unix)]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<DirKey> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<DirKey> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}
