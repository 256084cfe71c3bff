//! Configuration options for backups.
//!
//! This module provides [`BackupOptions`] for configuring a backup run and
//! [`SymlinkPolicy`] for deciding what happens to symlinks met while walking
//! a directory tree.
//!
//! # Example
//!
//! ```
//! use bkp::{BackupOptions, SymlinkPolicy};
//!
//! let options = BackupOptions::default()
//!     .with_symlinks(SymlinkPolicy::Skip)
//!     .without_fsync();
//! ```

/// What to do with a symlink found inside a source directory.
///
/// A symlink given directly as the top-level source is always followed.
///
/// # Default
///
/// The default is [`SymlinkPolicy::Follow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SymlinkPolicy {
    /// Copy what the link points to (default).
    ///
    /// Links to files are copied by content and links to directories are
    /// traversed. A link leading back to one of its own ancestors fails
    /// with [`Error::SymlinkLoop`](crate::Error::SymlinkLoop). Dangling
    /// links are skipped with a warning.
    #[default]
    Follow,
    /// Leave symlinks out of the backup, with a warning.
    Skip,
    /// Fail the backup at the first symlink.
    Error,
}

/// Options for backup operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `fsync` | `true` | Sync every file to disk after writing |
/// | `symlinks` | `Follow` | Copy symlink targets |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackupOptions {
    /// Whether to sync files to disk after writing (default: true)
    ///
    /// A backup is only complete once its data is on stable storage.
    pub fsync: bool,

    /// How symlinks inside a source directory are handled
    pub symlinks: SymlinkPolicy,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-entry progress messages (optional)
    ///
    /// If not set and `tracing` feature is enabled, messages are logged at
    /// debug level.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            fsync: true,
            symlinks: SymlinkPolicy::Follow,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl BackupOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a verbose handler
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    /// Set the symlink policy
    #[must_use]
    pub fn with_symlinks(mut self, policy: SymlinkPolicy) -> Self {
        self.symlinks = policy;
        self
    }

    /// Disable fsync for faster (but less durable) backups
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("{}", msg);
        }
    }
}
