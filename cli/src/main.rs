//! bkp - Backup
//!
//! A simple command-line tool to back up files and directories, powered by
//! the bkp library.

mod version;

use bkp::{BackupOptions, BackupStats, Error as BkpError, SymlinkPolicy, backup};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use version::BuildInfo;

const LONG_ABOUT: &str = "\
bkp is a simple command-line tool to back up files and directories.

Easily create backups of important data to ensure your files are safe and secure.
A single file is copied to DESTINATION, or into it when DESTINATION is an
existing directory. A directory is copied recursively, recreating its structure
under DESTINATION. DESTINATION may never be SOURCE itself or lie inside it.

Examples:
  bkp ./mydata ./backup
  bkp notes.txt /mnt/usb
  bkp version";

/// A simple CLI tool to back up files and directories
///
/// Usage:
///   bkp SOURCE DESTINATION
///   bkp version
#[derive(Parser, Debug)]
#[command(
    name = "bkp",
    about,
    long_about = LONG_ABOUT,
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// File or directory to back up
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Where the backup is written
    #[arg(value_name = "DESTINATION")]
    destination: Option<PathBuf>,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// What to do with symlinks found inside a source directory
    #[arg(long, value_enum, default_value = "follow")]
    symlinks: SymlinkMode,

    /// Log every entry and print a summary when done
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Show the current version of bkp
    ///
    /// Display detailed version information for the bkp CLI,
    /// including the version number, commit hash, and build date.
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SymlinkMode {
    /// Copy what the link points to
    Follow,
    /// Leave symlinks out of the backup
    Skip,
    /// Fail at the first symlink
    Error,
}

impl From<SymlinkMode> for SymlinkPolicy {
    fn from(mode: SymlinkMode) -> Self {
        match mode {
            SymlinkMode::Follow => SymlinkPolicy::Follow,
            SymlinkMode::Skip => SymlinkPolicy::Skip,
            SymlinkMode::Error => SymlinkPolicy::Error,
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{source}")]
    Backup { source: BkpError },

    #[error("Failed to write output: {source}")]
    Output { source: io::Error },
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backup { source } => source.kind().as_str(),
            Self::Output { .. } => "output",
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(error) = run(&args) {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber can only be installed once per process; losing logs is not fatal
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(args: &Args) -> CliResult<()> {
    if let Some(Command::Version) = args.command {
        let info = BuildInfo::from_build_env();
        return info
            .write_to(&mut io::stdout().lock())
            .map_err(|source| CliError::Output { source });
    }

    let (Some(source), Some(destination)) = (args.source.as_deref(), args.destination.as_deref())
    else {
        return Args::command()
            .print_help()
            .map_err(|source| CliError::Output { source });
    };

    let mut options = BackupOptions::default().with_symlinks(args.symlinks.into());
    if args.no_sync {
        options = options.without_fsync();
    }

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        fsync = options.fsync,
        symlinks = ?options.symlinks,
        "effective configuration"
    );

    let stats =
        backup(source, destination, &options).map_err(|source| CliError::Backup { source })?;

    if args.verbose {
        print_stats(&stats);
    }
    Ok(())
}

fn print_stats(stats: &BackupStats) {
    eprintln!("Backup completed in {:?}", stats.duration);
    eprintln!("  Files copied:   {}", stats.files_copied);
    eprintln!("  Directories:    {}", stats.dirs_created);
    eprintln!("  Skipped:        {}", stats.entries_skipped);
    eprintln!("  Total size:     {}", format_bytes(stats.bytes_copied));
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
