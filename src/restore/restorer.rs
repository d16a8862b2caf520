//! Replaying a mapping log backwards

use std::path::{Path, PathBuf};

use crate::core::RestoreStatistics;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::mapping::{read_log, LogRow, MappingRecord};

/// Order in which log rows are applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayOrder {
    /// Newest row first, undoing renames in the inverse of the order they
    /// were made. A file renamed inside a directory that was shortened later
    /// is found again once the directory row has been undone.
    #[default]
    Reverse,
    /// Rows in file order
    Forward,
}

/// What happened to one log row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    Restored,
    /// The renamed path no longer exists
    Missing,
    /// Something already sits at the original path
    Exists,
    /// The rename (or creating the original's parent) failed
    Failed(String),
    /// The row could not be parsed
    Malformed(String),
}

/// One log row and its outcome
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReport {
    pub record: Option<MappingRecord>,
    pub outcome: RowOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct RestoreReport {
    pub rows: Vec<RowReport>,
    pub statistics: RestoreStatistics,
}

/// Renames every logged new path back to its original path
///
/// Best effort: a row that cannot be restored is reported and the next row
/// is tried. Existing originals are never overwritten.
pub struct Restorer<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    order: ReplayOrder,
    on_row: Box<dyn FnMut(&RowReport) + 'a>,
}

impl<'a, F: FileSystem + ?Sized> Restorer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            order: ReplayOrder::default(),
            on_row: Box::new(|_| {}),
        }
    }

    pub fn with_order(mut self, order: ReplayOrder) -> Self {
        self.order = order;
        self
    }

    /// Registers a callback invoked after each row
    pub fn with_observer(mut self, on_row: impl FnMut(&RowReport) + 'a) -> Self {
        self.on_row = Box::new(on_row);
        self
    }

    /// Restores from the log at `log_path`
    ///
    /// Fails only when the log is missing or unreadable; row failures end up
    /// in the report.
    pub fn restore(self, log_path: &Path) -> Result<RestoreReport> {
        let rows = read_log(log_path)?;
        Ok(self.restore_rows(rows))
    }

    /// Restores from rows already read, given in file order
    pub fn restore_rows(mut self, mut rows: Vec<LogRow>) -> RestoreReport {
        if self.order == ReplayOrder::Reverse {
            rows.reverse();
        }

        let mut report = RestoreReport::default();
        for row in rows {
            let row_report = match row {
                LogRow::Record(record) => {
                    let outcome = self.restore_record(&record);
                    RowReport {
                        record: Some(record),
                        outcome,
                    }
                }
                LogRow::Malformed(reason) => RowReport {
                    record: None,
                    outcome: RowOutcome::Malformed(reason),
                },
            };

            let stats = &mut report.statistics;
            match &row_report.outcome {
                RowOutcome::Restored => stats.restored += 1,
                RowOutcome::Missing => stats.missing += 1,
                RowOutcome::Exists => stats.exists += 1,
                RowOutcome::Failed(_) => stats.failed += 1,
                RowOutcome::Malformed(_) => stats.malformed += 1,
            }
            (self.on_row)(&row_report);
            report.rows.push(row_report);
        }

        report
    }

    fn restore_record(&self, record: &MappingRecord) -> RowOutcome {
        let new_path = PathBuf::from(&record.new_path);
        let original = PathBuf::from(&record.original_path);

        if !self.fs.exists(&new_path) {
            return RowOutcome::Missing;
        }

        if let Some(parent) = original.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = self.fs.mkdir_all(parent) {
                return RowOutcome::Failed(e.to_string());
            }
        }

        if self.fs.exists(&original) {
            return RowOutcome::Exists;
        }

        match self.fs.rename(&new_path, &original) {
            Ok(()) => RowOutcome::Restored,
            Err(e) => RowOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    fn row(original: &str, new: &str) -> LogRow {
        LogRow::Record(MappingRecord::new(Path::new(original), Path::new(new)))
    }

    #[test]
    fn test_restores_simple_rename() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/short.txt");

        let report = Restorer::new(&fs).restore_rows(vec![row("/r/long-name.txt", "/r/short.txt")]);

        assert_eq!(report.rows[0].outcome, RowOutcome::Restored);
        assert!(fs.exists(Path::new("/r/long-name.txt")));
        assert!(!fs.exists(Path::new("/r/short.txt")));
        assert_eq!(report.statistics.restored, 1);
    }

    #[test]
    fn test_missing_new_path_is_skipped() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/r");

        let report = Restorer::new(&fs).restore_rows(vec![row("/r/orig", "/r/gone")]);
        assert_eq!(report.rows[0].outcome, RowOutcome::Missing);
        assert_eq!(report.statistics.missing, 1);
    }

    #[test]
    fn test_existing_original_is_not_overwritten() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/orig");
        fs.add_file("/r/new");

        let report = Restorer::new(&fs).restore_rows(vec![row("/r/orig", "/r/new")]);
        assert_eq!(report.rows[0].outcome, RowOutcome::Exists);
        assert!(fs.exists(Path::new("/r/new")));
        assert!(fs.renames().is_empty());
    }

    #[test]
    fn test_missing_ancestors_are_created() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/flat.txt");

        let report = Restorer::new(&fs).restore_rows(vec![row("/r/x/y/deep.txt", "/r/flat.txt")]);
        assert_eq!(report.rows[0].outcome, RowOutcome::Restored);
        assert!(fs.exists(Path::new("/r/x/y/deep.txt")));
    }

    #[test]
    fn test_rename_failure_does_not_stop_later_rows() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/a2");
        fs.add_file("/r/b2");
        fs.fail_rename_from("/r/a2");

        let report = Restorer::new(&fs)
            .with_order(ReplayOrder::Forward)
            .restore_rows(vec![row("/r/a1", "/r/a2"), row("/r/b1", "/r/b2")]);

        assert!(matches!(report.rows[0].outcome, RowOutcome::Failed(_)));
        assert_eq!(report.rows[1].outcome, RowOutcome::Restored);
        assert_eq!(report.statistics.failed, 1);
        assert_eq!(report.statistics.restored, 1);
    }

    #[test]
    fn test_reverse_order_recovers_nested_renames() {
        // Forward run: file shortened inside dir, then dir shortened
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/d/f");
        let rows = vec![row("/r/long-dir/long-file", "/r/long-dir/f"), row("/r/long-dir", "/r/d")];

        let report = Restorer::new(&fs).restore_rows(rows);

        assert!(report.rows.iter().all(|r| r.outcome == RowOutcome::Restored));
        assert!(fs.exists(Path::new("/r/long-dir/long-file")));
        assert!(!fs.exists(Path::new("/r/d")));
    }

    #[test]
    fn test_forward_order_misses_stale_nested_rows() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/r/d/f");
        let rows = vec![row("/r/long-dir/long-file", "/r/long-dir/f"), row("/r/long-dir", "/r/d")];

        let report = Restorer::new(&fs)
            .with_order(ReplayOrder::Forward)
            .restore_rows(rows);

        assert_eq!(report.rows[0].outcome, RowOutcome::Missing);
        assert_eq!(report.rows[1].outcome, RowOutcome::Restored);
        assert!(fs.exists(Path::new("/r/long-dir/f")));
    }

    #[test]
    fn test_malformed_rows_are_counted() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/r");

        let mut seen = Vec::new();
        let report = Restorer::new(&fs)
            .with_observer(|r| seen.push(r.outcome.clone()))
            .restore_rows(vec![LogRow::Malformed("expected 2 fields, found 1".into())]);

        assert_eq!(report.statistics.malformed, 1);
        assert_eq!(seen.len(), 1);
        assert!(report.rows[0].record.is_none());
    }
}
