//! # bkp
//!
//! Safe file and directory backups for Rust.
//!
//! ## Core Features
//!
//! - **Single files or whole trees**: [`backup`] inspects the source and picks the right copier
//! - **Never copies into itself**: the destination is rejected if it is the source or lies inside it
//! - **Durable writes**: every file is synced to disk before it counts as copied
//! - **Overwrite semantics**: re-running a backup refreshes the destination in place
//! - **Explicit symlink policy**: follow (with loop detection), skip, or fail
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use bkp::BackupBuilder;
//!
//! let stats = BackupBuilder::new("mydata", "backup").run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), bkp::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use bkp::{backup, BackupOptions, SymlinkPolicy};
//! use std::path::Path;
//!
//! let options = BackupOptions::default().with_symlinks(SymlinkPolicy::Skip);
//! let stats = backup(Path::new("mydata"), Path::new("backup"), &options)?;
//! # Ok::<(), bkp::Error>(())
//! ```
//!
//! ## Safety Guarantees
//!
//! ### Containment
//!
//! Both paths are made absolute and cleaned before comparison, so
//! `bkp docs docs/backup` and `bkp /home/me/docs ./docs/backup` are refused
//! alike. The check runs before anything is written.
//!
//! ### No Rollback
//!
//! A failed backup stops at the first error. Files copied before it remain,
//! and a file being written when the error hit may be partial. Re-running
//! the same backup is always safe.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`BackupOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod utils;

pub use builder::BackupBuilder;
pub use copy::{BackupStats, backup, copy_dir, copy_file, ensure_outside};
pub use error::{Error, ErrorKind, Result};
pub use options::{BackupOptions, SymlinkPolicy};
