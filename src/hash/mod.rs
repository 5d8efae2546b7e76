//! Content fingerprinting

use crate::types::SyncError;
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use xxhash_rust::xxh64::Xxh64;

/// Read granularity for fingerprinting
pub const CHUNK_SIZE: usize = 4096;

/// xxHash64 digest of a file's full content
///
/// Non-cryptographic. Equal fingerprints are taken to mean equal content;
/// a collision would make a changed file look unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Digest of an in-memory buffer, identical to hashing a file with these bytes
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Xxh64::new(0);
        hasher.update(bytes);
        Fingerprint(hasher.digest())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the fingerprint of a file
///
/// The file is streamed in 4 KiB chunks; nothing is cached, every call
/// re-reads the whole file.
///
/// # Returns
/// * `Ok(Fingerprint)` - digest of the file's bytes
/// * `Err(SyncError)` - the file could not be opened or read (removed
///   mid-scan, permission denied, ...). Callers treat this as "unavailable".
///
/// # Example
/// ```no_run
/// use replika::hash::compute_fingerprint;
/// use std::path::Path;
///
/// let fingerprint = compute_fingerprint(Path::new("file.txt"))?;
/// println!("{fingerprint}");
/// # Ok::<(), replika::types::SyncError>(())
/// ```
pub fn compute_fingerprint(file_path: &Path) -> Result<Fingerprint, SyncError> {
    let mut file = File::open(file_path).map_err(|e| SyncError::from_io(file_path, e))?;
    let mut hasher = Xxh64::new(0);
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SyncError::from_io(file_path, e)),
        };

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint(hasher.digest()))
}

/// Whether two files hold the same bytes, as far as fingerprints can tell
///
/// An unavailable fingerprint on either side never matches anything,
/// not even another read of the same path.
pub fn same_content(a: &Path, b: &Path) -> bool {
    match (compute_fingerprint(a), compute_fingerprint(b)) {
        (Ok(fa), Ok(fb)) => fa == fb,
        _ => false,
    }
}
