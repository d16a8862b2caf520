//! Tree walking for the rename pipeline

use ignore::WalkBuilder;
use std::path::Path;

use super::config::ESTIMATED_ENTRY_COUNT;
use crate::error::Result;
use crate::fs::{EntryKind, PathEntry};

/// Lists every entry below `root`, root excluded, in filesystem order
///
/// All of `ignore`'s filtering is switched off: hidden files, `.gitignore`
/// rules and the like are just more paths a sync client has to mirror.
/// Symlinks are reported as files and never followed.
pub fn walk_tree(root: &Path) -> Result<Vec<PathEntry>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut entries = Vec::with_capacity(ESTIMATED_ENTRY_COUNT);
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let kind = match entry.file_type() {
            Some(ft) if ft.is_dir() => EntryKind::Directory,
            _ => EntryKind::File,
        };
        entries.push(PathEntry::new(entry.into_path(), kind));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_includes_hidden_and_ignored_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("sub").join(".hidden")).unwrap();
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        fs::write(root.join("sub").join("run.log"), "x").unwrap();
        fs::write(root.join("sub").join(".hidden").join("note.txt"), "x").unwrap();

        let entries = walk_tree(root).unwrap();
        let relative: Vec<_> = entries
            .iter()
            .map(|e| e.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert!(relative.contains(&Path::new(".gitignore").to_path_buf()));
        assert!(relative.contains(&Path::new("sub/run.log").to_path_buf()));
        assert!(relative.contains(&Path::new("sub/.hidden/note.txt").to_path_buf()));
        assert!(!relative.iter().any(|p| p.as_os_str().is_empty()));
    }

    #[test]
    fn test_walk_classifies_kinds() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("dir")).unwrap();
        fs::write(root.join("dir").join("file.txt"), "x").unwrap();

        let entries = walk_tree(root).unwrap();
        let dir = entries.iter().find(|e| e.path == root.join("dir")).unwrap();
        let file = entries
            .iter()
            .find(|e| e.path == root.join("dir").join("file.txt"))
            .unwrap();
        assert_eq!(dir.kind, EntryKind::Directory);
        assert_eq!(file.kind, EntryKind::File);
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(walk_tree(&temp_dir.path().join("missing")).is_err());
    }
}
