//! DirTree - Directory structure observed by one scan

use super::{EntryKind, TreeEntry};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory tree of a sync root
///
/// Keys are directory paths relative to the root (the root itself is the
/// empty path). `PathBuf` orders component-wise, so a directory always
/// sorts before everything beneath it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirTree {
    /// Map: relative dir path → non-directory entries directly inside it
    pub dirs: BTreeMap<PathBuf, Vec<TreeEntry>>,

    /// Paths the walk could not read, with the reason
    pub issues: Vec<(PathBuf, String)>,

    /// Aggregate statistics
    pub total_files: usize,
    pub total_symlinks: usize,

    /// Scan metadata
    pub scan_duration: Duration,
    pub root_path: PathBuf,
}

impl DirTree {
    /// Create a tree holding only the (empty) root directory
    pub fn new(root_path: PathBuf) -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert(PathBuf::new(), Vec::new());
        Self {
            dirs,
            root_path,
            ..Default::default()
        }
    }

    /// Record a directory. Missing ancestors are recorded too.
    pub fn insert_dir(&mut self, path: PathBuf) {
        let mut current = Some(path.as_path());
        while let Some(dir) = current {
            if self.dirs.contains_key(dir) {
                break;
            }
            self.dirs.insert(dir.to_path_buf(), Vec::new());
            current = dir.parent();
        }
    }

    /// Record a non-directory entry under its parent directory
    ///
    /// Directory entries are routed to `insert_dir`.
    pub fn insert(&mut self, entry: TreeEntry) {
        match entry.kind {
            EntryKind::Directory => return self.insert_dir(entry.path),
            EntryKind::File => self.total_files += 1,
            EntryKind::Symlink => self.total_symlinks += 1,
        }

        let parent = entry
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.insert_dir(parent.clone());
        self.dirs.entry(parent).or_default().push(entry);
    }

    /// Record a path that could not be traversed
    pub fn push_issue(&mut self, path: PathBuf, reason: String) {
        self.issues.push((path, reason));
    }

    /// Entries directly inside `dir`
    pub fn entries_in(&self, dir: &Path) -> &[TreeEntry] {
        self.dirs.get(dir).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a directory was seen
    pub fn contains_dir(&self, dir: &Path) -> bool {
        self.dirs.contains_key(dir)
    }

    /// Number of directories, root included
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Directories with their entries, every parent before its children
    pub fn top_down(&self) -> impl Iterator<Item = (&PathBuf, &Vec<TreeEntry>)> {
        self.dirs.iter()
    }

    /// Directories with their entries, every directory after all of its descendants
    pub fn bottom_up(&self) -> impl Iterator<Item = (&PathBuf, &Vec<TreeEntry>)> {
        self.dirs.iter().rev()
    }

    /// Iterator over every non-directory entry
    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.dirs.values().flatten()
    }

    /// Set the scan duration after scanning completes
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }
}
