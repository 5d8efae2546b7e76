//! TreeEntry - A single path observed under a sync root

use std::fs::FileType;
use std::path::{Path, PathBuf};

/// What kind of filesystem object an entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Never followed; see `mirror_copy` and `prune_extra` for how each side treats them
    Symlink,
}

impl EntryKind {
    /// Classify a file type as reported by a non-following walk.
    ///
    /// Returns `None` for special files (pipes, sockets, devices).
    pub fn from_file_type(file_type: FileType) -> Option<Self> {
        if file_type.is_symlink() {
            Some(EntryKind::Symlink)
        } else if file_type.is_dir() {
            Some(EntryKind::Directory)
        } else if file_type.is_file() {
            Some(EntryKind::File)
        } else {
            None
        }
    }
}

/// A relative path plus its kind. Identity is the relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeEntry {
    /// Relative path from the sync root
    pub path: PathBuf,

    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), EntryKind::File)
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// The same relative path resolved under another root
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }
}
