//! Destination containment check.
//!
//! A backup must never write into the tree it is reading: copying `docs`
//! into `docs/backup` would keep discovering its own output.

use crate::error::{Error, Result};
use crate::utils::path::{absolute_clean, relative_path, starts_with_parent};
use std::path::Path;

/// Verify that `dst` lies outside `src`.
///
/// Both paths are made absolute and cleaned lexically, so `docs`,
/// `./docs` and `/home/user/docs` are treated alike when run from
/// `/home/user`. Symlinks are not resolved.
///
/// # Errors
///
/// - [`Error::PathResolution`] if either path cannot be made absolute
/// - [`Error::NestedDestination`] if `dst` is `src` or lies inside it
///
/// # Example
///
/// ```
/// use bkp::ensure_outside;
/// use std::path::Path;
///
/// assert!(ensure_outside(Path::new("/data"), Path::new("/backup")).is_ok());
/// assert!(ensure_outside(Path::new("/data"), Path::new("/data/backup")).is_err());
/// ```
pub fn ensure_outside(src: &Path, dst: &Path) -> Result<()> {
    let abs_src = absolute_clean(src).map_err(|source| Error::PathResolution {
        path: src.to_path_buf(),
        source,
    })?;
    let abs_dst = absolute_clean(dst).map_err(|source| Error::PathResolution {
        path: dst.to_path_buf(),
        source,
    })?;

    match relative_path(&abs_src, &abs_dst) {
        Some(rel) if rel.as_os_str().is_empty() || !starts_with_parent(&rel) => {
            Err(Error::NestedDestination {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
            })
        }
        // No relative path at all means nothing is shared, not even a root
        _ => Ok(()),
    }
}
