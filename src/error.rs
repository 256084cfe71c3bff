//! Error types for bkp.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during a backup, the [`ErrorKind`] tag used to match on
//! them, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Paths | [`Error::PathResolution`], [`Error::NestedDestination`] |
//! | Source | [`Error::SourceNotFound`], [`Error::SourceAccess`], [`Error::SourceOpen`] |
//! | Destination | [`Error::DestinationAccess`], [`Error::DirectoryCreation`], [`Error::DestinationCreate`] |
//! | Data | [`Error::CopyStream`], [`Error::Sync`] |
//! | Traversal | [`Error::SymlinkLoop`], [`Error::SymlinkRejected`], [`Error::Entry`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bkp operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a backup.
///
/// Every variant names the path involved, and IO failures keep the original
/// [`io::Error`] reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A path could not be made absolute
    #[error("Failed to resolve absolute path of {path}: {source}")]
    PathResolution {
        /// The path that could not be resolved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination is the source itself or lies inside it
    #[error("Destination {dst} cannot be inside source {src}")]
    NestedDestination {
        /// Source path as given
        src: PathBuf,
        /// Destination path as given
        dst: PathBuf,
    },

    /// Source path does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Source exists but cannot be inspected or listed
    #[error("Unable to access source {path}: {source}")]
    SourceAccess {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination could not be inspected
    #[error("Failed to access destination {path}: {source}")]
    DestinationAccess {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A destination directory could not be created
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source file could not be opened for reading
    #[error("Failed to open source file {path}: {source}")]
    SourceOpen {
        /// Source file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination file could not be created or truncated
    #[error("Failed to create destination file {path}: {source}")]
    DestinationCreate {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Reading or writing file contents failed
    ///
    /// The destination may be left partially written.
    #[error("Failed to copy {src} to {dst}: {source}")]
    CopyStream {
        /// Source file
        src: PathBuf,
        /// Destination file
        dst: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Flushing the destination to stable storage failed
    #[error("Failed to sync {path} to disk: {source}")]
    Sync {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Following a symlink led back to one of its ancestor directories
    #[error("Symlink loop detected: {0}")]
    SymlinkLoop(PathBuf),

    /// A symlink was met while [`SymlinkPolicy::Error`](crate::SymlinkPolicy::Error) is active
    #[error("Refusing to copy symlink: {0}")]
    SymlinkRejected(PathBuf),

    /// Failure while backing up one entry of a directory tree
    #[error("Failed to back up {path}: {source}")]
    Entry {
        /// Source entry that failed
        path: PathBuf,
        /// The error raised for that entry
        source: Box<Error>,
    },
}

impl Error {
    /// The kind of this error.
    ///
    /// [`Error::Entry`] reports the kind of the error it wraps, so callers
    /// can match on the root failure regardless of traversal context.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathResolution { .. } => ErrorKind::PathResolution,
            Self::NestedDestination { .. } => ErrorKind::NestedDestination,
            Self::SourceNotFound(_) => ErrorKind::SourceNotFound,
            Self::SourceAccess { .. } => ErrorKind::SourceAccess,
            Self::DestinationAccess { .. } => ErrorKind::DestinationAccess,
            Self::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
            Self::SourceOpen { .. } => ErrorKind::SourceOpen,
            Self::DestinationCreate { .. } => ErrorKind::DestinationCreate,
            Self::CopyStream { .. } => ErrorKind::CopyStream,
            Self::Sync { .. } => ErrorKind::Sync,
            Self::SymlinkLoop(_) => ErrorKind::SymlinkLoop,
            Self::SymlinkRejected(_) => ErrorKind::SymlinkRejected,
            Self::Entry { source, .. } => source.kind(),
        }
    }

    /// Classify a failed stat of the source path.
    pub(crate) fn source_stat(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::SourceNotFound(path)
        } else {
            Self::SourceAccess { path, source }
        }
    }
}

/// Tag identifying the category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`Error::PathResolution`]
    PathResolution,
    /// See [`Error::NestedDestination`]
    NestedDestination,
    /// See [`Error::SourceNotFound`]
    SourceNotFound,
    /// See [`Error::SourceAccess`]
    SourceAccess,
    /// See [`Error::DestinationAccess`]
    DestinationAccess,
    /// See [`Error::DirectoryCreation`]
    DirectoryCreation,
    /// See [`Error::SourceOpen`]
    SourceOpen,
    /// See [`Error::DestinationCreate`]
    DestinationCreate,
    /// See [`Error::CopyStream`]
    CopyStream,
    /// See [`Error::Sync`]
    Sync,
    /// See [`Error::SymlinkLoop`]
    SymlinkLoop,
    /// See [`Error::SymlinkRejected`]
    SymlinkRejected,
}

impl ErrorKind {
    /// Stable snake-case name, used in CLI diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PathResolution => "path_resolution",
            Self::NestedDestination => "nested_destination",
            Self::SourceNotFound => "source_not_found",
            Self::SourceAccess => "source_access",
            Self::DestinationAccess => "destination_access",
            Self::DirectoryCreation => "directory_creation",
            Self::SourceOpen => "source_open",
            Self::DestinationCreate => "destination_create",
            Self::CopyStream => "copy_stream",
            Self::Sync => "sync",
            Self::SymlinkLoop => "symlink_loop",
            Self::SymlinkRejected => "symlink_rejected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
