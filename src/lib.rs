//! # replika - One-way folder mirroring
//!
//! Keeps a replica directory identical to a source directory: new and
//! changed files are copied over, files missing from the source are
//! removed from the replica. Directories are created but never removed.
//!
//! The core is a single stateless call, [`sync`], that runs one cycle and
//! reports what it did through [`SyncEvent`]s. Scheduling, logging and
//! process lifecycle live in [`commands`] and the `replika` binary.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod hash;
pub mod logging;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use executor::sync;
pub use hash::Fingerprint;
pub use types::{CycleStats, DirTree, EventKind, SyncError, SyncEvent, TreeEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
