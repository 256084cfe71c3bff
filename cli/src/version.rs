//! The `version` subcommand.
//!
//! Build metadata is fixed at compile time from environment variables, so
//! release pipelines can stamp binaries without touching the source:
//!
//! ```text
//! BKP_VERSION=v1.2.3 BKP_COMMIT=abc123 BKP_BUILD_DATE=2025-11-03 cargo build --release
//! ```

use std::io::{self, Write};

/// Version metadata of this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Semantic version, e.g. `v1.2.3`
    pub version: &'static str,
    /// Git commit hash
    pub commit: &'static str,
    /// Build timestamp
    pub built: &'static str,
}

impl BuildInfo {
    /// Metadata captured from `BKP_VERSION`, `BKP_COMMIT` and
    /// `BKP_BUILD_DATE` at compile time, with development defaults.
    pub const fn from_build_env() -> Self {
        Self {
            version: or_default(option_env!("BKP_VERSION"), "dev"),
            commit: or_default(option_env!("BKP_COMMIT"), "none"),
            built: or_default(option_env!("BKP_BUILD_DATE"), "unknown"),
        }
    }

    /// Write the one-line version report.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "bkp version {} (commit {}, built {})",
            self.version, self.commit, self.built
        )
    }
}

const fn or_default(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}
