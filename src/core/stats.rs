//! Statistics for rename and restore runs

use serde::Serialize;
use std::time::Duration;

use crate::fs::EntryKind;
use crate::naming::{RenameDecision, Strategy};

/// Counters for a forward rename run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenameStatistics {
    pub files_scanned: u64,
    pub dirs_scanned: u64,
    pub files_renamed: u64,
    pub dirs_renamed: u64,
    pub digest_fallbacks: u64,
    pub still_over_budget: u64,
}

impl RenameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts an entry the walk produced
    pub fn record_scanned(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files_scanned += 1,
            EntryKind::Directory => self.dirs_scanned += 1,
        }
    }

    /// Counts a rename decision that was carried out
    pub fn record_rename(&mut self, kind: EntryKind, decision: &RenameDecision) {
        match kind {
            EntryKind::File => self.files_renamed += 1,
            EntryKind::Directory => self.dirs_renamed += 1,
        }
        if decision.strategy == Strategy::Digest {
            self.digest_fallbacks += 1;
        }
        if !decision.within_budget {
            self.still_over_budget += 1;
        }
    }

    pub fn total_renamed(&self) -> u64 {
        self.files_renamed + self.dirs_renamed
    }

    /// One-line summary of the run
    pub fn generate_summary(&self, duration: Duration) -> String {
        let mut summary = format!(
            "✅ Completed in {:.1}s • {} files • {} dirs renamed",
            duration.as_secs_f64(),
            self.files_renamed,
            self.dirs_renamed
        );
        if self.digest_fallbacks > 0 {
            summary.push_str(&format!(" • {} digest names", self.digest_fallbacks));
        }
        if self.still_over_budget > 0 {
            summary.push_str(&format!(" • {} still over budget", self.still_over_budget));
        }
        summary
    }
}

/// Counters for a restore run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RestoreStatistics {
    pub restored: u64,
    pub missing: u64,
    pub exists: u64,
    pub failed: u64,
    pub malformed: u64,
}

impl RestoreStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_rows(&self) -> u64 {
        self.restored + self.missing + self.exists + self.failed + self.malformed
    }

    pub fn generate_summary(&self, duration: Duration) -> String {
        let mut summary = format!(
            "✅ Restore finished in {:.1}s • {} restored • {} skipped • {} existing",
            duration.as_secs_f64(),
            self.restored,
            self.missing,
            self.exists
        );
        if self.failed > 0 {
            summary.push_str(&format!(" • {} failed", self.failed));
        }
        if self.malformed > 0 {
            summary.push_str(&format!(" • {} malformed rows", self.malformed));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn decision(strategy: Strategy, within_budget: bool) -> RenameDecision {
        RenameDecision {
            original: PathBuf::from("/r/long"),
            new_name: "short".into(),
            destination: PathBuf::from("/r"),
            new_path: PathBuf::from("/r/short"),
            strategy,
            within_budget,
        }
    }

    #[test]
    fn test_rename_statistics_initialization() {
        let stats = RenameStatistics::new();
        assert_eq!(stats.total_renamed(), 0);
        assert_eq!(stats.files_scanned, 0);
        assert_eq!(stats.digest_fallbacks, 0);
    }

    #[test]
    fn test_record_rename_counts_strategy_and_budget() {
        let mut stats = RenameStatistics::new();
        stats.record_rename(EntryKind::File, &decision(Strategy::Truncated, true));
        stats.record_rename(EntryKind::File, &decision(Strategy::Digest, false));
        stats.record_rename(EntryKind::Directory, &decision(Strategy::Digest, true));

        assert_eq!(stats.files_renamed, 2);
        assert_eq!(stats.dirs_renamed, 1);
        assert_eq!(stats.digest_fallbacks, 2);
        assert_eq!(stats.still_over_budget, 1);
        assert_eq!(stats.total_renamed(), 3);
    }

    #[test]
    fn test_rename_summary_mentions_fallbacks_only_when_used() {
        let mut stats = RenameStatistics::new();
        stats.record_rename(EntryKind::File, &decision(Strategy::Truncated, true));
        let summary = stats.generate_summary(Duration::from_millis(1500));
        assert!(summary.contains("1.5s"));
        assert!(summary.contains("1 files"));
        assert!(!summary.contains("digest"));

        stats.record_rename(EntryKind::File, &decision(Strategy::Digest, true));
        assert!(stats
            .generate_summary(Duration::ZERO)
            .contains("1 digest names"));
    }

    #[test]
    fn test_restore_summary() {
        let stats = RestoreStatistics {
            restored: 3,
            missing: 1,
            exists: 0,
            failed: 2,
            malformed: 0,
        };
        assert_eq!(stats.total_rows(), 6);
        let summary = stats.generate_summary(Duration::ZERO);
        assert!(summary.contains("3 restored"));
        assert!(summary.contains("2 failed"));
        assert!(!summary.contains("malformed"));
    }
}
