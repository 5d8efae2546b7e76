//! SyncEvent - What a sync cycle did, one event per observable step

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Event emitted while a cycle runs. Paths are relative to their root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Replica directory created to match a source directory
    DirCreated { path: PathBuf },

    /// Source file copied over (or into) the replica
    Copied { path: PathBuf, bytes: u64 },

    /// Replica file without a source counterpart removed
    Deleted { path: PathBuf },

    /// Replica directory left empty after pruning, intentionally kept
    EmptyDirRetained { path: PathBuf },

    /// Source file vanished between traversal and copy
    SourceMissing { path: PathBuf },

    /// Per-file failure or policy skip; the cycle carried on
    Skipped { path: PathBuf, reason: String },
}

/// Field-less discriminant of `SyncEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DirCreated,
    Copied,
    Deleted,
    EmptyDirRetained,
    SourceMissing,
    Skipped,
}

impl SyncEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SyncEvent::DirCreated { .. } => EventKind::DirCreated,
            SyncEvent::Copied { .. } => EventKind::Copied,
            SyncEvent::Deleted { .. } => EventKind::Deleted,
            SyncEvent::EmptyDirRetained { .. } => EventKind::EmptyDirRetained,
            SyncEvent::SourceMissing { .. } => EventKind::SourceMissing,
            SyncEvent::Skipped { .. } => EventKind::Skipped,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SyncEvent::DirCreated { path }
            | SyncEvent::Copied { path, .. }
            | SyncEvent::Deleted { path }
            | SyncEvent::EmptyDirRetained { path }
            | SyncEvent::SourceMissing { path }
            | SyncEvent::Skipped { path, .. } => path,
        }
    }

    /// Copies and deletions; the events an already-mirrored pair never produces
    pub fn is_mutation(&self) -> bool {
        matches!(self, SyncEvent::Copied { .. } | SyncEvent::Deleted { .. })
    }
}

/// Callback used to receive cycle events.
pub type EventCallback = dyn Fn(&SyncEvent) + Send + Sync;

/// Counters for one Mirror-Copy, one Prune-Extra, or a whole cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub dirs_created: usize,
    pub copied: usize,
    pub bytes_copied: u64,
    pub deleted: usize,
    pub retained_empty_dirs: usize,
    pub source_missing: usize,
    pub skipped: usize,
    pub duration: Duration,
}

impl CycleStats {
    /// Count an event
    pub fn record(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::DirCreated { .. } => self.dirs_created += 1,
            SyncEvent::Copied { bytes, .. } => {
                self.copied += 1;
                self.bytes_copied += bytes;
            }
            SyncEvent::Deleted { .. } => self.deleted += 1,
            SyncEvent::EmptyDirRetained { .. } => self.retained_empty_dirs += 1,
            SyncEvent::SourceMissing { .. } => self.source_missing += 1,
            SyncEvent::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Fold another phase's counters into this one
    pub fn merge(&mut self, other: &CycleStats) {
        self.dirs_created += other.dirs_created;
        self.copied += other.copied;
        self.bytes_copied += other.bytes_copied;
        self.deleted += other.deleted;
        self.retained_empty_dirs += other.retained_empty_dirs;
        self.source_missing += other.source_missing;
        self.skipped += other.skipped;
        self.duration += other.duration;
    }

    /// Number of copy and delete operations performed
    pub fn mutations(&self) -> usize {
        self.copied + self.deleted
    }

    /// Number of per-file problems reported
    pub fn problems(&self) -> usize {
        self.source_missing + self.skipped
    }
}
