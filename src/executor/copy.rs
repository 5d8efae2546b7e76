//! Atomic file copy implementation

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Buffer size for streaming file bytes
const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Open the source (a vanished or unreadable source fails here, before
///    the destination directory is touched)
/// 2. Stream into a hidden temporary file next to `dest`
/// 3. Flush and sync to disk
/// 4. Preserve metadata (permission bits, access and modification time)
/// 5. Atomic rename over `dest`
///
/// On any failure the temporary file is removed and `dest` keeps its
/// previous content.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use replika::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), replika::types::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    // ═══════════════════════════════════════════════════════════
    // STEP 1: Prepare - Open source, ensure parent directory
    // ═══════════════════════════════════════════════════════════
    let mut src_file = File::open(src).map_err(|e| SyncError::from_io(src, e))?;
    let src_metadata = src_file
        .metadata()
        .map_err(|e| SyncError::from_io(src, e))?;

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| SyncError::from_io(parent, e))?;

    // ═══════════════════════════════════════════════════════════
    // STEP 2: Copy - Stream from src to the temporary file
    // ═══════════════════════════════════════════════════════════
    let mut part_file = tempfile::Builder::new()
        .prefix(".replika-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|e| SyncError::from_io(parent, e))?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SyncError::from_io(src, e)),
        };

        part_file
            .write_all(&buffer[..bytes_read])
            .map_err(SyncError::Io)?;
        total_bytes += bytes_read as u64;
    }

    // ═══════════════════════════════════════════════════════════
    // STEP 3: Flush - Force OS to write data to physical disk
    // ═══════════════════════════════════════════════════════════
    part_file.as_file().sync_all().map_err(SyncError::Io)?;

    // ═══════════════════════════════════════════════════════════
    // STEP 4: Metadata - Preserve permissions and times
    // ═══════════════════════════════════════════════════════════
    fs::set_permissions(part_file.path(), src_metadata.permissions()).map_err(SyncError::Io)?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    let atime = filetime::FileTime::from_last_access_time(&src_metadata);
    filetime::set_file_times(part_file.path(), atime, mtime).map_err(SyncError::Io)?;

    // ═══════════════════════════════════════════════════════════
    // STEP 5: Commit - Atomic rename to final destination
    // ═══════════════════════════════════════════════════════════
    part_file
        .persist(dest)
        .map_err(|e| SyncError::from_io(dest, e.error))?;

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_leaves_no_part_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::write(root.join("src.txt"), b"payload").expect("write src");
        fs::create_dir(root.join("out")).expect("create out");

        copy_file_atomic(&root.join("src.txt"), &root.join("out/dest.txt"))
            .expect("copy should succeed");

        let names: Vec<String> = fs::read_dir(root.join("out"))
            .expect("read out")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["dest.txt".to_string()]);
    }

    #[test]
    fn test_missing_source_keeps_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        let dest = root.join("dest.txt");
        fs::write(&dest, b"keep me").expect("write dest");

        let result = copy_file_atomic(&root.join("gone.txt"), &dest);

        assert!(result.expect_err("copy must fail").is_not_found());
        assert_eq!(fs::read(&dest).expect("read dest"), b"keep me");
    }
}
