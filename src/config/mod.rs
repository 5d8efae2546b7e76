//! Configuration management

mod cli;
mod file;

pub use cli::Cli;
pub use file::ConfigFile;

use super::types::SyncError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default seconds between two sync cycles
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Global configuration for replika
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory (read only)
    pub source: PathBuf,

    /// Replica directory (mirrored into)
    pub replica: PathBuf,

    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,

    /// Append-mode log file
    pub log_file: PathBuf,

    /// Run a single cycle and exit
    pub once: bool,

    /// Extra console verbosity (-v count)
    pub verbosity: u8,

    /// Only warnings and errors on the console
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            replica: PathBuf::new(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            once: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate configuration
    ///
    /// Fatal conditions only: nothing here creates or modifies files.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::Config("Source path is empty".to_string()));
        }
        if self.replica.as_os_str().is_empty() {
            return Err(SyncError::Config("Replica path is empty".to_string()));
        }

        // Ensure source exists
        if !self.source.is_dir() {
            return Err(SyncError::SourceMissing {
                path: self.source.clone(),
            });
        }

        if self.interval.is_zero() {
            return Err(SyncError::Config(
                "Sync interval must be at least one second".to_string(),
            ));
        }

        let source = absolute(&self.source)?;
        let replica = absolute(&self.replica)?;

        // Ensure source != replica
        if source == replica {
            return Err(SyncError::Config(
                "Source and replica cannot be the same".to_string(),
            ));
        }

        // Mirroring into itself would grow forever; pruning a tree that
        // contains the source would delete source files.
        if replica.starts_with(&source) {
            return Err(SyncError::Validation(format!(
                "Replica {} lies inside source {}",
                self.replica.display(),
                self.source.display()
            )));
        }
        if source.starts_with(&replica) {
            return Err(SyncError::Validation(format!(
                "Source {} lies inside replica {}",
                self.source.display(),
                self.replica.display()
            )));
        }

        Ok(())
    }

    /// Create the replica root if it is missing
    ///
    /// Returns `true` when it had to be created.
    pub fn ensure_replica(&self) -> Result<bool, SyncError> {
        crate::executor::ensure_dir(&self.replica)
    }
}

/// Resolve a path for containment checks
///
/// Existing paths are canonicalized (symlinks resolved); a missing path is
/// resolved through its nearest existing ancestor.
fn absolute(path: &Path) -> Result<PathBuf, SyncError> {
    let mut missing = Vec::new();
    let mut current = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    loop {
        match current.canonicalize() {
            Ok(resolved) => {
                return Ok(missing.into_iter().rev().fold(resolved, |acc, part| acc.join(part)))
            }
            Err(_) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = parent.to_path_buf();
                }
                _ => return Ok(path.to_path_buf()),
            },
        }
    }
}
