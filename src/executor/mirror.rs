//! Mirror-Copy: propagate source files into the replica

use super::{emit_event, ensure_dir};
use crate::executor::copy_file_atomic;
use crate::hash::same_content;
use crate::scanner::scan_tree;
use crate::types::{CycleStats, EventCallback, SyncError, SyncEvent, TreeEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Make every source file exist, byte-identical, in the replica
///
/// Directories are visited parents-first. Each replica directory is
/// created before anything is copied into it, empty source directories
/// included. A file is copied when its replica counterpart is missing or
/// the fingerprints differ (an unavailable fingerprint counts as
/// different). Per-file failures become events; only an unreadable source
/// root is an error.
pub fn mirror_copy(
    source: &Path,
    replica: &Path,
    on_event: Option<&EventCallback>,
) -> Result<CycleStats, SyncError> {
    let start_time = Instant::now();
    let tree = scan_tree(source)?;
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

    let mut blocked: Vec<PathBuf> = Vec::new();
    for (dir, entries) in tree.top_down() {
        if blocked.iter().any(|b| dir.starts_with(b)) {
            continue;
        }

        let replica_dir = replica.join(dir);
        let ensured = if dir.as_os_str().is_empty() {
            ensure_dir(&replica_dir)
        } else {
            ensure_replica_dir(&replica_dir)
        };
        match ensured {
            Ok(true) => emit(SyncEvent::DirCreated { path: dir.clone() }),
            Ok(false) => {}
            Err(e) => {
                // Nothing below this directory can land, subdirectories included
                emit(SyncEvent::Skipped {
                    path: dir.clone(),
                    reason: format!("cannot create replica directory: {e}"),
                });
                blocked.push(dir.clone());
                continue;
            }
        }

        for entry in entries {
            if let Some(event) = mirror_entry(entry, source, replica) {
                emit(event);
            }
        }
    }

    stats.duration = start_time.elapsed();
    Ok(stats)
}

/// Bring one source entry up to date; `None` when nothing needed doing
fn mirror_entry(entry: &TreeEntry, source: &Path, replica: &Path) -> Option<SyncEvent> {
    if entry.is_symlink() {
        return Some(SyncEvent::Skipped {
            path: entry.path.clone(),
            reason: "symbolic link not followed".to_string(),
        });
    }

    let src_file = entry.under(source);
    let replica_file = entry.under(replica);

    // Only a regular replica file can be up to date; a symlink is replaced
    let needs_copy = match fs::symlink_metadata(&replica_file) {
        Ok(metadata) if metadata.is_file() => !same_content(&src_file, &replica_file),
        _ => true,
    };
    if !needs_copy {
        return None;
    }

    match copy_file_atomic(&src_file, &replica_file) {
        Ok(bytes) => Some(SyncEvent::Copied {
            path: entry.path.clone(),
            bytes,
        }),
        Err(e) if is_source_gone(&e, &src_file) => Some(SyncEvent::SourceMissing {
            path: entry.path.clone(),
        }),
        Err(e) => Some(SyncEvent::Skipped {
            path: entry.path.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Like `ensure_dir`, but a symlink in the replica never stands in for a
/// directory
fn ensure_replica_dir(path: &Path) -> Result<bool, SyncError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => Err(SyncError::Validation(format!(
            "{} is a symbolic link, not followed",
            path.display()
        ))),
        _ => ensure_dir(path),
    }
}

fn is_source_gone(error: &SyncError, src_file: &Path) -> bool {
    error.is_not_found()
        && matches!(fs::symlink_metadata(src_file), Err(e) if e.kind() == ErrorKind::NotFound)
}
