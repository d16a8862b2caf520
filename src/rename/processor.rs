//! Forward pass: shorten every over-budget path under the root

use std::path::PathBuf;

use crate::core::{RenameConfig, RenameStatistics};
use crate::error::Result;
use crate::fs::{EntryKind, FileSystem, PathEntry};
use crate::mapping::MappingLog;
use crate::naming::{decide, is_over_budget, RenameDecision};

/// Whether decisions are carried out
#[derive(Clone, Copy, Debug)]
pub enum RunMode<'a> {
    /// Rename on disk and append each rename to the log
    Apply(&'a MappingLog),
    /// Compute and report decisions only
    DryRun,
}

/// One over-budget entry and what was decided for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameOutcome {
    pub kind: EntryKind,
    /// Byte length of the original full path
    pub original_len: usize,
    pub decision: RenameDecision,
    /// False in a dry run
    pub applied: bool,
}

/// Progress notifications emitted while a run walks the tree
#[derive(Debug)]
pub enum RenameEvent<'e> {
    Examining(&'e PathEntry),
    Renamed(&'e RenameOutcome),
}

/// Everything a finished run produced
#[derive(Clone, Debug, Default)]
pub struct RenameReport {
    pub outcomes: Vec<RenameOutcome>,
    pub statistics: RenameStatistics,
    pub log_path: Option<PathBuf>,
}

/// Walks the configured root and shortens over-budget paths
///
/// Files are handled first, in walk order. Directories follow, longest path
/// first, so a directory is renamed only after everything below it and each
/// decision is made against the directory's path as it currently is.
///
/// Any filesystem error ends the run; rows already in the mapping log stay
/// valid.
pub struct TreeProcessor<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    config: &'a RenameConfig,
    mode: RunMode<'a>,
    on_event: Box<dyn FnMut(RenameEvent<'_>) + 'a>,
}

impl<'a, F: FileSystem + ?Sized> TreeProcessor<'a, F> {
    pub fn new(fs: &'a F, config: &'a RenameConfig, mode: RunMode<'a>) -> Self {
        Self {
            fs,
            config,
            mode,
            on_event: Box::new(|_| {}),
        }
    }

    /// Registers a callback for progress events
    pub fn with_observer(mut self, on_event: impl FnMut(RenameEvent<'_>) + 'a) -> Self {
        self.on_event = Box::new(on_event);
        self
    }

    pub fn run(mut self) -> Result<RenameReport> {
        let config = self.config;
        config.validate()?;
        let root = &config.root;
        let mut report = RenameReport {
            log_path: match self.mode {
                RunMode::Apply(log) => Some(log.path().to_path_buf()),
                RunMode::DryRun => None,
            },
            ..RenameReport::default()
        };

        let files = self
            .fs
            .list(root)?
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::File);
        for entry in files {
            self.process_entry(&entry, &mut report)?;
        }

        // Listed only now: file renames above never move a directory
        let mut dirs: Vec<PathEntry> = self
            .fs
            .list(root)?
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Directory)
            .collect();
        dirs.sort_by_key(|entry| std::cmp::Reverse(entry.byte_len()));
        for entry in &dirs {
            self.process_entry(entry, &mut report)?;
        }

        Ok(report)
    }

    fn process_entry(&mut self, entry: &PathEntry, report: &mut RenameReport) -> Result<()> {
        report.statistics.record_scanned(entry.kind);
        (self.on_event)(RenameEvent::Examining(entry));

        if !is_over_budget(self.config, &entry.path) || self.is_own_log(entry) {
            return Ok(());
        }

        let decision = decide(self.fs, self.config, entry)?;
        let applied = match self.mode {
            RunMode::Apply(log) => {
                self.fs.rename(&entry.path, &decision.new_path)?;
                log.append(&entry.path, &decision.new_path)?;
                true
            }
            RunMode::DryRun => false,
        };

        report.statistics.record_rename(entry.kind, &decision);
        let outcome = RenameOutcome {
            kind: entry.kind,
            original_len: entry.byte_len(),
            decision,
            applied,
        };
        (self.on_event)(RenameEvent::Renamed(&outcome));
        report.outcomes.push(outcome);
        Ok(())
    }

    /// The mapping log is never renamed, even when it lives under the root
    fn is_own_log(&self, entry: &PathEntry) -> bool {
        match self.mode {
            RunMode::Apply(log) => entry.path == log.path(),
            RunMode::DryRun => false,
        }
    }
}
