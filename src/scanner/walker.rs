//! Sequential directory walker

use crate::types::{DirTree, EntryKind, SyncError, TreeEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Scan a directory and build a DirTree
///
/// Walks the directory tree recursively with the `ignore` crate, every
/// filter disabled: hidden files, `.gitignore`d files and the like are
/// part of the tree. Symlinks are recorded as `EntryKind::Symlink` and
/// never followed.
///
/// # Errors
/// * The root itself missing or unreadable returns `SyncError`
/// * Anything below the root that cannot be read (permission denied,
///   entries vanishing mid-walk, special files) is recorded in
///   `DirTree::issues` and the walk continues
pub fn scan_tree(root_path: &Path) -> Result<DirTree, SyncError> {
    let start_time = Instant::now();

    let metadata = fs::metadata(root_path).map_err(|e| SyncError::from_io(root_path, e))?;
    if !metadata.is_dir() {
        return Err(SyncError::Validation(format!(
            "Not a directory: {}",
            root_path.display()
        )));
    }
    // Opening the root up front turns an unreadable root into an error
    // instead of a silently empty tree.
    fs::read_dir(root_path).map_err(|e| SyncError::from_io(root_path, e))?;

    let mut tree = DirTree::new(root_path.to_path_buf());

    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue; // The root itself
                }

                let relative_path = match entry.path().strip_prefix(root_path) {
                    Ok(p) => p.to_path_buf(),
                    Err(_) => {
                        tree.push_issue(
                            entry.path().to_path_buf(),
                            "path lies outside the scanned root".to_string(),
                        );
                        continue;
                    }
                };

                let kind = match entry.file_type().and_then(EntryKind::from_file_type) {
                    Some(kind) => kind,
                    None => {
                        tree.push_issue(
                            relative_path,
                            "not a regular file, directory or symlink".to_string(),
                        );
                        continue;
                    }
                };

                tree.insert(TreeEntry::new(relative_path, kind));
            }
            Err(e) => {
                let path = error_path(&e)
                    .map(|p| relative_to(root_path, &p))
                    .unwrap_or_default();
                tree.push_issue(path, e.to_string());
            }
        }
    }

    tree.set_scan_duration(start_time.elapsed());

    Ok(tree)
}

/// Path an `ignore` walk error is about, if it names one
fn error_path(error: &ignore::Error) -> Option<PathBuf> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root_path = temp_dir.path();

        let tree = scan_tree(root_path).expect("scan_tree should succeed on empty dir");

        assert_eq!(tree.dir_count(), 1, "Only the root");
        assert_eq!(tree.total_files, 0);
        assert!(tree.issues.is_empty());
        assert_eq!(tree.root_path, root_path);
    }

    #[test]
    fn test_scan_nested_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root_path = temp_dir.path();

        // root/a/b/file.txt, root/c/file2.txt, root/empty/
        fs::create_dir_all(root_path.join("a/b")).expect("Failed to create dirs");
        fs::create_dir(root_path.join("c")).expect("Failed to create dir");
        fs::create_dir(root_path.join("empty")).expect("Failed to create dir");
        fs::write(root_path.join("a/b/file.txt"), b"File 1").expect("Failed to write");
        fs::write(root_path.join("c/file2.txt"), b"File 2").expect("Failed to write");

        let tree = scan_tree(root_path).expect("scan_tree should succeed");

        assert_eq!(tree.total_files, 2);
        for dir in ["", "a", "a/b", "c", "empty"] {
            assert!(tree.contains_dir(Path::new(dir)), "missing dir {dir:?}");
        }
        assert_eq!(
            tree.entries_in(Path::new("a/b")),
            &[TreeEntry::file("a/b/file.txt")]
        );
        assert!(tree.entries_in(Path::new("empty")).is_empty());
    }

    #[test]
    fn test_scan_includes_hidden_and_ignored_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::create_dir(root.join(".git")).expect("Failed to create .git dir");
        fs::write(root.join(".gitignore"), "*.log\n").expect("write .gitignore");
        fs::write(root.join(".hidden"), b"h").expect("write hidden");
        fs::write(root.join("debug.log"), b"l").expect("write log");

        let tree = scan_tree(root).expect("scan_tree should succeed");
        let paths: Vec<PathBuf> = tree.entries().map(|e| e.path.clone()).collect();

        assert!(paths.contains(&PathBuf::from(".gitignore")));
        assert!(paths.contains(&PathBuf::from(".hidden")));
        assert!(paths.contains(&PathBuf::from("debug.log")));
        assert!(tree.contains_dir(Path::new(".git")));
    }

    #[test]
    #[cfg(unix)] // Symlinks work differently on Windows
    fn test_scan_records_symlinks_without_following() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root_path = temp_dir.path();

        fs::create_dir(root_path.join("real")).expect("create dir");
        fs::write(root_path.join("real/inner.txt"), b"x").expect("write file");
        std::os::unix::fs::symlink(root_path.join("real"), root_path.join("dirlink"))
            .expect("Failed to create symlink");
        std::os::unix::fs::symlink(root_path.join("missing"), root_path.join("broken"))
            .expect("Failed to create symlink");

        let tree = scan_tree(root_path).expect("scan_tree should succeed");

        assert_eq!(tree.total_symlinks, 2);
        assert!(!tree.contains_dir(Path::new("dirlink")), "must not descend into links");
        let kinds: Vec<EntryKind> = tree
            .entries_in(Path::new(""))
            .iter()
            .map(|e| e.kind)
            .collect();
        assert!(kinds.iter().all(|k| *k == EntryKind::Symlink));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let result = scan_tree(&missing);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_scan_file_root_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"x").expect("write file");

        assert!(matches!(scan_tree(&file), Err(SyncError::Validation(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_subdirectory_is_an_issue_not_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        let locked = root.join("locked");
        fs::create_dir(&locked).expect("create dir");
        fs::write(locked.join("secret.txt"), b"s").expect("write file");
        fs::write(root.join("open.txt"), b"o").expect("write file");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Root ignores permission bits; nothing to observe then.
        let readable = fs::read_dir(&locked).is_ok();

        let tree = scan_tree(root).expect("scan_tree should succeed");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod back");

        assert!(tree.entries().any(|e| e.path == Path::new("open.txt")));
        if !readable {
            assert!(!tree.issues.is_empty());
        }
    }
}
