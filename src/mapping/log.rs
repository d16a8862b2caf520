//! Append-only CSV log of renames

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::core::{LOG_FILE_EXTENSION, LOG_FILE_PREFIX, LOG_HEADER, LOG_TIMESTAMP_FORMAT};
use crate::error::{PathfitError, Result};

/// One rename, as stored in the log
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MappingRecord {
    pub original_path: String,
    pub new_path: String,
}

impl MappingRecord {
    pub fn new(original: &Path, new: &Path) -> Self {
        Self {
            original_path: original.to_string_lossy().into_owned(),
            new_path: new.to_string_lossy().into_owned(),
        }
    }
}

/// A data row read back from a log
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogRow {
    Record(MappingRecord),
    /// Row that could not be used, with the reason
    Malformed(String),
}

/// `rename_backup_<YYYYMMDD_HHMMSS>.csv` for the given moment
pub fn log_file_name(at: DateTime<Local>) -> String {
    format!(
        "{LOG_FILE_PREFIX}{}.{LOG_FILE_EXTENSION}",
        at.format(LOG_TIMESTAMP_FORMAT)
    )
}

/// Handle to a mapping log on disk
///
/// Every append opens, writes and closes the file so a killed run still
/// leaves one row per completed rename.
#[derive(Clone, Debug)]
pub struct MappingLog {
    path: PathBuf,
}

impl MappingLog {
    /// Creates (or truncates) the log at `path` and writes the header row
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| PathfitError::io("create log", &path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(LOG_HEADER)?;
        writer
            .flush()
            .map_err(|e| PathfitError::io("write log", &path, e))?;
        Ok(Self { path })
    }

    /// Creates a log in `dir` named after the current local time
    pub fn create_timestamped(dir: &Path) -> Result<Self> {
        Self::create(dir.join(log_file_name(Local::now())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row and closes the file again
    pub fn append(&self, original: &Path, new: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| PathfitError::io("open log", &self.path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(MappingRecord::new(original, new))?;
        writer
            .flush()
            .map_err(|e| PathfitError::io("write log", &self.path, e))?;
        Ok(())
    }
}

/// Reads every data row of the log at `path`, header skipped, in file order
pub fn read_log(path: &Path) -> Result<Vec<LogRow>> {
    if !path.is_file() {
        return Err(PathfitError::LogNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) if record.len() >= 2 => rows.push(LogRow::Record(MappingRecord {
                original_path: record[0].to_string(),
                new_path: record[1].to_string(),
            })),
            Ok(record) => rows.push(LogRow::Malformed(format!(
                "expected 2 fields, found {}",
                record.len()
            ))),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => rows.push(LogRow::Malformed(e.to_string())),
        }
    }

    Ok(rows)
}
