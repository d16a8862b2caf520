//! Real-disk implementation of [`FileSystem`]

use std::fs;
use std::path::Path;

use super::{EntryKind, FileSystem, PathEntry};
use crate::core::walk_tree;
use crate::error::{PathfitError, Result};

/// [`FileSystem`] backed by `std::fs` and an `ignore` walker
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn list(&self, root: &Path) -> Result<Vec<PathEntry>> {
        walk_tree(root)
    }

    fn stat(&self, path: &Path) -> Option<EntryKind> {
        // symlink_metadata so a dangling link still occupies its name
        fs::symlink_metadata(path).ok().map(|meta| {
            if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            }
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| PathfitError::io("rename", from, e))
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| PathfitError::io("create directory", path, e))
    }
}
