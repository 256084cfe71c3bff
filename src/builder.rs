//! Builder API for ergonomic backups.
//!
//! The builder pattern provides a fluent interface for configuring and
//! running a backup. This is often more convenient than manually
//! constructing [`BackupOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use bkp::BackupBuilder;
//!
//! let stats = BackupBuilder::new("mydata", "backup").run()?;
//! println!("Backed up {} files", stats.files_copied);
//! # Ok::<(), bkp::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use bkp::{BackupBuilder, SymlinkPolicy};
//!
//! let stats = BackupBuilder::new("mydata", "backup")
//!     .symlinks(SymlinkPolicy::Skip)  // Leave symlinks out
//!     .no_fsync()                     // Faster, less durable
//!     .run()?;
//! # Ok::<(), bkp::Error>(())
//! ```

use crate::copy::{BackupStats, backup};
use crate::error::Result;
use crate::options::{BackupOptions, SymlinkPolicy};
use std::path::{Path, PathBuf};

/// A builder for configuring and running a backup.
///
/// `BackupBuilder` detects whether the source is a file or a directory and
/// calls the appropriate copier, exactly like [`backup`](crate::backup).
#[derive(Debug, Clone)]
pub struct BackupBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: BackupOptions,
}

impl BackupBuilder {
    /// Create a new `BackupBuilder` with the given source and destination paths.
    ///
    /// Uses default options (fsync on, follow symlinks).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: BackupOptions::default(),
        }
    }

    /// Skip the fsync after each file.
    ///
    /// Faster, but a crash shortly after the backup may lose data that was
    /// still in the page cache.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Choose how symlinks inside a source directory are handled.
    #[must_use]
    pub fn symlinks(mut self, policy: SymlinkPolicy) -> Self {
        self.options = self.options.with_symlinks(policy);
        self
    }

    /// Set a handler for warnings (skipped entries).
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Set a handler for per-entry progress messages.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Get the configured options.
    pub fn options(&self) -> &BackupOptions {
        &self.options
    }

    /// Run the backup.
    ///
    /// # Errors
    ///
    /// See [`backup`](crate::backup).
    pub fn run(self) -> Result<BackupStats> {
        backup(&self.src, &self.dst, &self.options)
    }
}
