//! Restore command implementation
//!
//! Replays a mapping log so every shortened path gets its original name
//! back. Individual rows may fail; the command always runs to the end.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use crate::core::{
    create_spinner, print_status, set_terminal_title, RestoreStatistics, Status,
};
use crate::error::PathfitError;
use crate::fs::OsFileSystem;
use crate::restore::{ReplayOrder, Restorer, RowOutcome, RowReport};

/// Options for one restore run
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub order: ReplayOrder,
    /// Print a JSON summary instead of progress lines
    pub json: bool,
}

#[derive(Serialize)]
struct RestoreRunSummary<'a> {
    log_path: String,
    statistics: &'a RestoreStatistics,
}

/// Status tag and message printed for one row
pub fn describe_row(row: &RowReport) -> (Status, String) {
    let (original, new) = match &row.record {
        Some(record) => (record.original_path.as_str(), record.new_path.as_str()),
        None => ("", ""),
    };

    match &row.outcome {
        RowOutcome::Restored => (Status::Restored, format!("{new} → {original}")),
        RowOutcome::Missing => (Status::Skip, format!("nothing to restore at {new}")),
        RowOutcome::Exists => (
            Status::Exists,
            format!("{original} already exists, skipped"),
        ),
        RowOutcome::Failed(reason) => (
            Status::Error,
            format!("could not restore {new} → {original} ({reason})"),
        ),
        RowOutcome::Malformed(reason) => (Status::Error, format!("unreadable row: {reason}")),
    }
}

/// Main handler for the restore command
pub fn handle_restore_command(log_path: &Path, options: RestoreOptions) -> Result<()> {
    set_terminal_title("🚀 pathfit restore");
    let start_time = Instant::now();

    let fs = OsFileSystem::new();
    let spinner = create_spinner(!options.json)?;
    let result = Restorer::new(&fs)
        .with_order(options.order)
        .with_observer(|row| {
            if !options.json {
                let (status, message) = describe_row(row);
                print_status(&spinner, status, &message);
            }
        })
        .restore(log_path);
    spinner.finish_and_clear();
    set_terminal_title("✅ pathfit");

    let report = match result {
        Ok(report) => report,
        Err(e @ PathfitError::LogNotFound(_)) => {
            // Reported, not fatal
            print_status(&spinner, Status::Error, &e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if options.json {
        let summary = RestoreRunSummary {
            log_path: log_path.to_string_lossy().into_owned(),
            statistics: &report.statistics,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("{}", report.statistics.generate_summary(start_time.elapsed()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingRecord;

    fn report(outcome: RowOutcome) -> RowReport {
        RowReport {
            record: Some(MappingRecord {
                original_path: "/r/original".into(),
                new_path: "/r/new".into(),
            }),
            outcome,
        }
    }

    #[test]
    fn test_describe_row_tags() {
        assert_eq!(describe_row(&report(RowOutcome::Restored)).0, Status::Restored);
        assert_eq!(describe_row(&report(RowOutcome::Missing)).0, Status::Skip);
        assert_eq!(describe_row(&report(RowOutcome::Exists)).0, Status::Exists);
        assert_eq!(
            describe_row(&report(RowOutcome::Failed("denied".into()))).0,
            Status::Error
        );
    }

    #[test]
    fn test_describe_row_messages() {
        let (_, message) = describe_row(&report(RowOutcome::Restored));
        assert_eq!(message, "/r/new → /r/original");

        let (_, message) = describe_row(&report(RowOutcome::Failed("denied".into())));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_missing_log_is_not_fatal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = handle_restore_command(
            &temp_dir.path().join("missing.csv"),
            RestoreOptions {
                order: ReplayOrder::Reverse,
                json: true,
            },
        );
        assert!(result.is_ok());
    }
}
