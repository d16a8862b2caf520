//! Filesystem capability used by the rename and restore pipelines
//!
//! Everything that touches disk goes through the [`FileSystem`] trait so the
//! naming and tree logic can run against [`MemoryFileSystem`] in tests and
//! against [`OsFileSystem`] in the binary.

mod memory;
mod os;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Kind of a node observed during a walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A filesystem node as seen at one point of a walk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Encoded byte length of the full path
    pub fn byte_len(&self) -> usize {
        path_byte_len(&self.path)
    }

    /// Final path segment, lossily decoded
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Splits the basename into (stem, extension). Directories never carry
    /// an extension.
    pub fn stem_and_extension(&self) -> (String, String) {
        let name = self.name();
        match self.kind {
            EntryKind::Directory => (name, String::new()),
            EntryKind::File => split_extension(&name),
        }
    }

    /// Parent directory the entry is renamed within
    pub fn parent(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// Byte length of a path in the platform encoding (UTF-8 for UTF-8 paths)
pub fn path_byte_len(path: &Path) -> usize {
    path.as_os_str().as_encoded_bytes().len()
}

/// Splits `name` at its last dot. Leading-dot names (`.bashrc`) and names
/// ending in a dot have no extension. The extension keeps its dot.
pub fn split_extension(name: &str) -> (String, String) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => {
            (name[..idx].to_string(), name[idx..].to_string())
        }
        _ => (name.to_string(), String::new()),
    }
}

/// Operations the pipelines need from a filesystem
pub trait FileSystem {
    /// Every entry below `root`, root itself excluded, in enumeration order
    fn list(&self, root: &Path) -> Result<Vec<PathEntry>>;

    /// Kind of the node at `path` without following symlinks, if any
    fn stat(&self, path: &Path) -> Option<EntryKind>;

    /// Renames `from` to `to`; `to`'s parent must already exist
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Creates `path` and any missing ancestors
    fn mkdir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_some()
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list(&self, root: &Path) -> Result<Vec<PathEntry>> {
        (**self).list(root)
    }

    fn stat(&self, path: &Path) -> Option<EntryKind> {
        (**self).stat(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).rename(from, to)
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        (**self).mkdir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.pdf"), ("report".into(), ".pdf".into()));
        assert_eq!(split_extension("a.tar.gz"), ("a.tar".into(), ".gz".into()));
        assert_eq!(split_extension(".bashrc"), (".bashrc".into(), String::new()));
        assert_eq!(split_extension("trailing."), ("trailing.".into(), String::new()));
        assert_eq!(split_extension("README"), ("README".into(), String::new()));
    }

    #[test]
    fn test_directories_have_no_extension() {
        let entry = PathEntry::new("/root/photos.2024", EntryKind::Directory);
        assert_eq!(entry.stem_and_extension(), ("photos.2024".into(), String::new()));

        let entry = PathEntry::new("/root/photos.2024", EntryKind::File);
        assert_eq!(entry.stem_and_extension(), ("photos".into(), ".2024".into()));
    }

    #[test]
    fn test_byte_len_counts_encoded_bytes() {
        let entry = PathEntry::new("/가나", EntryKind::File);
        assert_eq!(entry.byte_len(), 7);
    }
}
