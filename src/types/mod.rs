//! Core type definitions for replika

mod entry;
mod error;
mod event;
mod tree;

pub use entry::{EntryKind, TreeEntry};
pub use error::SyncError;
pub use event::{CycleStats, EventCallback, EventKind, SyncEvent};
pub use tree::DirTree;
