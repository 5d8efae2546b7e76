//! Executor module: the sync cycle and its two phases

pub mod copy;
pub mod mirror;
pub mod prune;

use crate::types::{CycleStats, EventCallback, SyncError, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

pub use copy::copy_file_atomic;
pub use mirror::mirror_copy;
pub use prune::prune_extra;

/// Run one sync cycle: exactly one Mirror-Copy, then exactly one Prune-Extra
///
/// Keeps no state between calls. Calling it repeatedly with the same
/// arguments converges to, then holds at, a mirrored replica.
///
/// Per-file problems are reported through `on_event` and counted in the
/// returned stats; they never fail the cycle.
///
/// # Errors
/// * `SyncError::SourceMissing` if the source root is gone or is not a
///   directory. Nothing is copied or pruned in that case, so a vanished
///   source never empties the replica.
/// * An IO error if the replica root cannot be (re)created or read.
pub fn sync(
    source: &Path,
    replica: &Path,
    on_event: Option<&EventCallback>,
) -> Result<CycleStats, SyncError> {
    let start_time = Instant::now();

    match fs::metadata(source) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(SyncError::SourceMissing {
                path: source.to_path_buf(),
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SyncError::SourceMissing {
                path: source.to_path_buf(),
            })
        }
        Err(e) => return Err(SyncError::from_io(source, e)),
    }

    ensure_dir(replica)?;

    let mut stats = mirror_copy(source, replica, on_event)?;
    let pruned = prune_extra(replica, source, on_event)?;
    stats.merge(&pruned);

    stats.duration = start_time.elapsed();
    Ok(stats)
}

/// Create `path` and its missing ancestors. Returns whether anything was created.
pub(crate) fn ensure_dir(path: &Path) -> Result<bool, SyncError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(false),
        Ok(_) => Err(SyncError::Validation(format!(
            "{} exists and is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| SyncError::from_io(path, e))?;
            Ok(true)
        }
        Err(e) => Err(SyncError::from_io(path, e)),
    }
}

fn emit_event(on_event: Option<&EventCallback>, event: SyncEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
