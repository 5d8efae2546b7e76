//! Error types for replika

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for replika operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source root is gone or is not a directory
    #[error("Source folder missing: {path}")]
    SourceMissing { path: PathBuf },

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Scheduling runtime failure (tokio runtime, blocking task join)
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SyncError {
    /// Check if this error stops the process before any cycle runs
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::SourceMissing { .. } | SyncError::Config(_) | SyncError::Validation(_)
        )
    }

    /// Check if the underlying cause is a missing path
    pub fn is_not_found(&self) -> bool {
        match self {
            SyncError::SourceMissing { .. } => true,
            SyncError::Io(e) => e.kind() == ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Attach a path to a raw IO error where the kind deserves one
    pub fn from_io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        if error.kind() == ErrorKind::PermissionDenied {
            SyncError::PermissionDenied { path: path.into() }
        } else {
            SyncError::Io(error)
        }
    }
}
