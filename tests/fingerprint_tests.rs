//! Content fingerprint tests
//!
//! Determinism, sensitivity to content, and the "unavailable" fallback.

use replika::hash::{compute_fingerprint, same_content, Fingerprint, CHUNK_SIZE};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_temp_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

#[test]
fn test_fingerprint_deterministic_across_reads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = create_temp_file(&temp_dir, "file.txt", b"Same content");

    let first = compute_fingerprint(&file).expect("Failed to compute fingerprint");
    let second = compute_fingerprint(&file).expect("Failed to compute fingerprint");

    assert_eq!(first, second);
}

#[test]
fn test_fingerprint_ignores_name_and_mtime() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file1 = create_temp_file(&temp_dir, "file1.txt", b"Same content");
    let file2 = create_temp_file(&temp_dir, "other-name.bin", b"Same content");
    filetime::set_file_mtime(&file2, filetime::FileTime::from_unix_time(1_000, 0))
        .expect("set mtime");

    assert_eq!(
        compute_fingerprint(&file1).unwrap(),
        compute_fingerprint(&file2).unwrap()
    );
}

#[test]
fn test_fingerprint_single_byte_change() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut content = vec![7u8; CHUNK_SIZE * 2];
    let file1 = create_temp_file(&temp_dir, "file1.bin", &content);
    content[CHUNK_SIZE + 1] = 8;
    let file2 = create_temp_file(&temp_dir, "file2.bin", &content);

    assert_ne!(
        compute_fingerprint(&file1).unwrap(),
        compute_fingerprint(&file2).unwrap()
    );
}

#[test]
fn test_fingerprint_matches_known_xxh64() {
    let temp_dir = tempfile::tempdir().unwrap();
    let empty = create_temp_file(&temp_dir, "empty", b"");

    // xxHash64 of empty input with seed 0
    assert_eq!(
        compute_fingerprint(&empty).unwrap().as_u64(),
        0xef46_db37_51d8_e999
    );
    assert_eq!(
        compute_fingerprint(&empty).unwrap().to_string(),
        "ef46db3751d8e999"
    );
}

#[test]
fn test_fingerprint_of_bytes_agrees_with_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = create_temp_file(&temp_dir, "hello.txt", b"hello");

    assert_eq!(
        compute_fingerprint(&file).unwrap(),
        Fingerprint::of_bytes(b"hello")
    );
}

#[test]
fn test_unavailable_fingerprint_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing.txt");

    assert!(compute_fingerprint(&missing).is_err());
    assert!(compute_fingerprint(temp_dir.path()).is_err(), "directories have no fingerprint");
}

#[test]
fn test_same_content_treats_unavailable_as_different() {
    let temp_dir = tempfile::tempdir().unwrap();
    let present = create_temp_file(&temp_dir, "present.txt", b"data");
    let missing = temp_dir.path().join("missing.txt");

    assert!(same_content(&present, &present));
    assert!(!same_content(&present, &missing));
    assert!(!same_content(&missing, &present));
    assert!(!same_content(&missing, &missing));
}
