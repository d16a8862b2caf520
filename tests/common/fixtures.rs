//! Test fixtures and builders

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use goobits_pathfit::core::{walk_tree, RenameConfig};
use goobits_pathfit::fs::path_byte_len;

/// Longest directory name the fixtures create
const MAX_SEGMENT: usize = 200;

/// A directory tree under a temporary root with automatic cleanup
pub struct TestTree {
    pub temp_dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Root of the tree that gets renamed
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scratch directory next to the tree, for mapping logs
    pub fn scratch(&self) -> PathBuf {
        self.temp_dir.path().join("scratch")
    }

    /// Byte length of the root path
    pub fn root_len(&self) -> usize {
        path_byte_len(&self.root)
    }

    /// Creates a file (and its parents) at `rel` below the root
    pub fn create_file(&self, rel: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, path.to_string_lossy().as_bytes())?;
        Ok(path)
    }

    /// Creates a directory (and its parents) at `rel` below the root
    pub fn create_dir(&self, rel: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.root.join(rel);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Every path below the root, relative to it
    pub fn snapshot(&self) -> Result<BTreeSet<PathBuf>> {
        Ok(walk_tree(&self.root)?
            .into_iter()
            .map(|entry| {
                entry
                    .path
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or(entry.path)
            })
            .collect())
    }

    /// Configuration whose full-path budget is the root length plus `extra`
    pub fn config(&self, extra: usize, max_name_bytes: usize) -> RenameConfig {
        RenameConfig {
            max_full_path: self.root_len() + extra,
            max_name_bytes,
            ..RenameConfig::with_root(&self.root)
        }
    }
}

/// Builder for creating test trees
pub struct TestTreeBuilder {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    pub fn with_file(mut self, rel: impl Into<PathBuf>) -> Self {
        self.files.push(rel.into());
        self
    }

    pub fn with_dir(mut self, rel: impl Into<PathBuf>) -> Self {
        self.dirs.push(rel.into());
        self
    }

    pub fn build(self) -> Result<TestTree> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("tree");
        std::fs::create_dir(&root)?;
        std::fs::create_dir(temp_dir.path().join("scratch"))?;

        let tree = TestTree { temp_dir, root };
        for dir in &self.dirs {
            tree.create_dir(dir)?;
        }
        for file in &self.files {
            tree.create_file(file)?;
        }
        Ok(tree)
    }
}

/// Relative directory path that makes `root/<result>` exactly `target_len`
/// bytes long, split into segments the filesystem accepts
pub fn dir_of_len(root: &Path, target_len: usize) -> PathBuf {
    let root_len = path_byte_len(root);
    assert!(
        target_len >= root_len + 2,
        "root {} is too long for a {target_len}-byte path",
        root.display()
    );

    let mut remaining = target_len - root_len;
    let mut rel = PathBuf::new();
    let mut depth = 0u8;
    while remaining > 0 {
        // Each segment costs its length plus one separator
        let mut seg = (remaining - 1).min(MAX_SEGMENT);
        if remaining - 1 - seg == 1 {
            seg -= 1;
        }
        let letter = char::from(b'a' + depth % 26);
        rel.push(letter.to_string().repeat(seg));
        remaining -= seg + 1;
        depth += 1;
    }
    rel
}
