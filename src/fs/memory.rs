//! In-memory [`FileSystem`] double
//!
//! Keeps a flat map of absolute paths to node kinds. Renaming a directory
//! moves every descendant with it, the same way a real rename would.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, FileSystem, PathEntry};
use crate::error::{PathfitError, Result};

#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<PathBuf, EntryKind>>,
    failing_renames: RefCell<BTreeSet<PathBuf>>,
    renames: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating its ancestors as directories
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_ancestors(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), EntryKind::File);
    }

    /// Adds a directory and its ancestors
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert_ancestors(path.as_ref());
    }

    /// Makes every later rename whose source is `path` fail with
    /// `PermissionDenied`
    pub fn fail_rename_from(&self, path: impl AsRef<Path>) {
        self.failing_renames
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Successful renames in the order they happened
    pub fn renames(&self) -> Vec<(PathBuf, PathBuf)> {
        self.renames.borrow().clone()
    }

    fn insert_ancestors(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes
                .entry(ancestor.to_path_buf())
                .or_insert(EntryKind::Directory);
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn list(&self, root: &Path) -> Result<Vec<PathEntry>> {
        let nodes = self.nodes.borrow();
        if nodes.get(root) != Some(&EntryKind::Directory) {
            return Err(PathfitError::io(
                "walk",
                root,
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            ));
        }
        Ok(nodes
            .iter()
            .filter(|(path, _)| path.starts_with(root) && path.as_path() != root)
            .map(|(path, kind)| PathEntry::new(path.clone(), *kind))
            .collect())
    }

    fn stat(&self, path: &Path) -> Option<EntryKind> {
        self.nodes.borrow().get(path).copied()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if self.failing_renames.borrow().contains(from) {
            return Err(PathfitError::io(
                "rename",
                from,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }

        let mut nodes = self.nodes.borrow_mut();
        if !nodes.contains_key(from) {
            return Err(PathfitError::io(
                "rename",
                from,
                io::Error::new(io::ErrorKind::NotFound, "source does not exist"),
            ));
        }
        if nodes.contains_key(to) {
            return Err(PathfitError::io(
                "rename",
                to,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination exists"),
            ));
        }
        let parent_ok = to
            .parent()
            .map(|p| nodes.get(p) == Some(&EntryKind::Directory))
            .unwrap_or(false);
        if !parent_ok {
            return Err(PathfitError::io(
                "rename",
                to,
                io::Error::new(io::ErrorKind::NotFound, "destination parent missing"),
            ));
        }

        let moved: Vec<(PathBuf, EntryKind)> = nodes
            .iter()
            .filter(|(path, _)| path.starts_with(from))
            .map(|(path, kind)| (path.clone(), *kind))
            .collect();
        for (path, kind) in moved {
            nodes.remove(&path);
            let rest = path.strip_prefix(from).unwrap_or(Path::new(""));
            let target = if rest.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(rest)
            };
            nodes.insert(target, kind);
        }
        drop(nodes);

        self.renames
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        if path
            .ancestors()
            .any(|a| self.stat(a) == Some(EntryKind::File))
        {
            return Err(PathfitError::io(
                "create directory",
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "a file is in the way"),
            ));
        }
        self.insert_ancestors(path);
        Ok(())
    }
}
