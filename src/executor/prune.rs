//! Prune-Extra: remove replica files that have no source counterpart

use super::emit_event;
use crate::scanner::scan_tree;
use crate::types::{CycleStats, EventCallback, SyncError, SyncEvent, TreeEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// What the source side holds at a replica file's relative path
#[derive(Debug, PartialEq, Eq)]
enum Counterpart {
    Present,
    Absent,
    /// Could not tell; the replica file must be left alone
    Unknown(String),
}

/// Remove every replica file whose source counterpart is gone
///
/// Directories are visited bottom-up so the emptiness check on a directory
/// sees the result of all deletions beneath it. Directories are never
/// removed, the replica root included; each one found empty is reported
/// as `EmptyDirRetained`.
pub fn prune_extra(
    replica: &Path,
    source: &Path,
    on_event: Option<&EventCallback>,
) -> Result<CycleStats, SyncError> {
    let start_time = Instant::now();
    let tree = scan_tree(replica)?;
    let mut stats = CycleStats::default();
    let mut emit = |event: SyncEvent| {
        stats.record(&event);
        emit_event(on_event, event);
    };

    for (path, reason) in &tree.issues {
        emit(SyncEvent::Skipped {
            path: path.clone(),
            reason: reason.clone(),
        });
    }

    for (dir, entries) in tree.bottom_up() {
        for entry in entries {
            if let Some(event) = prune_entry(entry, replica, source) {
                emit(event);
            }
        }

        if is_empty_dir(&replica.join(dir)) {
            emit(SyncEvent::EmptyDirRetained { path: dir.clone() });
        }
    }

    stats.duration = start_time.elapsed();
    Ok(stats)
}

/// Delete one replica entry if its source counterpart is gone
fn prune_entry(entry: &TreeEntry, replica: &Path, source: &Path) -> Option<SyncEvent> {
    match counterpart(&entry.under(source)) {
        Counterpart::Present => None,
        Counterpart::Unknown(reason) => Some(SyncEvent::Skipped {
            path: entry.path.clone(),
            reason: format!("cannot check source counterpart: {reason}"),
        }),
        Counterpart::Absent => match fs::remove_file(entry.under(replica)) {
            Ok(()) => Some(SyncEvent::Deleted {
                path: entry.path.clone(),
            }),
            // Already gone; nothing was deleted by us
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => Some(SyncEvent::Skipped {
                path: entry.path.clone(),
                reason: format!("delete failed: {e}"),
            }),
        },
    }
}

/// Only a regular file in source counts as a counterpart. Source
/// symlinks are never mirrored, so they do not keep a replica file alive.
fn counterpart(source_path: &Path) -> Counterpart {
    match fs::symlink_metadata(source_path) {
        Ok(metadata) if metadata.is_file() => Counterpart::Present,
        Ok(_) => Counterpart::Absent,
        Err(e) if e.kind() == ErrorKind::NotFound => Counterpart::Absent,
        // A component that is a file, not a directory (ENOTDIR)
        Err(_) if has_file_ancestor(source_path) => Counterpart::Absent,
        Err(e) => Counterpart::Unknown(e.to_string()),
    }
}

fn has_file_ancestor(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .any(|p| fs::symlink_metadata(p).map(|m| m.is_file()).unwrap_or(false))
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
