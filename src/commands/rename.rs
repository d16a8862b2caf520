//! Rename command implementation
//!
//! This module handles the forward run: resolving the configuration, creating
//! the mapping log, walking the tree and printing one line per rename.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{
    create_spinner, print_status, set_terminal_title, show_examining, ConfigFile, RenameConfig,
    RenameStatistics, Status, NOTHING_TO_DO_MESSAGE, SCANNING_MESSAGE,
};
use crate::fs::{EntryKind, OsFileSystem};
use crate::mapping::MappingLog;
use crate::naming::Strategy;
use crate::rename::{RenameEvent, RenameOutcome, RenameReport, RunMode, TreeProcessor};
use crate::utils::{format_byte_len, shorten_path};

/// Settings given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub max_full_path: Option<usize>,
    pub max_name_bytes: Option<usize>,
    pub max_collision_attempts: Option<u32>,
}

/// Options for one forward run
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub overrides: ConfigOverrides,
    /// Directory the mapping log is created in
    pub log_dir: PathBuf,
    /// Compute and print decisions without renaming anything
    pub dry_run: bool,
    /// Print a JSON summary instead of progress lines
    pub json: bool,
}

/// Builds the run configuration: defaults, then the config file, then flags
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<RenameConfig> {
    let mut config = RenameConfig::default();

    if let Some(path) = &overrides.config_file {
        let file = ConfigFile::load(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?;
        config = config.merge(file);
    }
    if let Some(root) = &overrides.root {
        config.root = root.clone();
    }
    if let Some(max_full_path) = overrides.max_full_path {
        config.max_full_path = max_full_path;
    }
    if let Some(max_name_bytes) = overrides.max_name_bytes {
        config.max_name_bytes = max_name_bytes;
    }
    if let Some(attempts) = overrides.max_collision_attempts {
        config.max_collision_attempts = attempts;
    }

    config.root = std::path::absolute(&config.root)
        .with_context(|| format!("cannot resolve root {}", config.root.display()))?;
    config.validate()?;
    Ok(config)
}

#[derive(Serialize)]
struct RenameEntrySummary {
    kind: &'static str,
    original_path: String,
    new_path: String,
    strategy: Strategy,
    within_budget: bool,
}

#[derive(Serialize)]
struct RenameRunSummary {
    root: String,
    dry_run: bool,
    log_path: Option<String>,
    statistics: RenameStatistics,
    renames: Vec<RenameEntrySummary>,
}

impl RenameRunSummary {
    fn new(config: &RenameConfig, dry_run: bool, report: &RenameReport) -> Self {
        Self {
            root: config.root.to_string_lossy().into_owned(),
            dry_run,
            log_path: report
                .log_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            statistics: report.statistics.clone(),
            renames: report
                .outcomes
                .iter()
                .map(|outcome| RenameEntrySummary {
                    kind: match outcome.kind {
                        EntryKind::File => "file",
                        EntryKind::Directory => "dir",
                    },
                    original_path: outcome.decision.original.to_string_lossy().into_owned(),
                    new_path: outcome.decision.new_path.to_string_lossy().into_owned(),
                    strategy: outcome.decision.strategy,
                    within_budget: outcome.decision.within_budget,
                })
                .collect(),
        }
    }
}

/// Formats the line printed for one rename
pub fn format_outcome(outcome: &RenameOutcome) -> String {
    let mut line = format!(
        "{} → {}",
        format_byte_len(outcome.original_len),
        outcome.decision.new_name
    );
    if !outcome.applied {
        line.push_str(" (dry run)");
    }
    line
}

fn status_for(outcome: &RenameOutcome) -> Status {
    match outcome.kind {
        EntryKind::File => Status::File,
        EntryKind::Directory => Status::Dir,
    }
}

/// Main handler for the rename command
pub fn handle_rename_command(options: RenameOptions) -> Result<()> {
    set_terminal_title("🚀 pathfit");

    let config = resolve_config(&options.overrides)?;
    let start_time = Instant::now();

    let log = if options.dry_run {
        None
    } else {
        Some(create_log(&options.log_dir, &config.root)?)
    };
    let mode = match &log {
        Some(log) => RunMode::Apply(log),
        None => RunMode::DryRun,
    };

    if !options.json {
        println!();
        println!("{SCANNING_MESSAGE}");
    }

    let fs = OsFileSystem::new();
    let spinner = create_spinner(!options.json)?;
    let result = TreeProcessor::new(&fs, &config, mode)
        .with_observer(|event| match event {
            RenameEvent::Examining(entry) => show_examining(&spinner, &entry.path),
            RenameEvent::Renamed(outcome) if !options.json => {
                print_status(&spinner, status_for(outcome), &format_outcome(outcome));
                if !outcome.decision.within_budget {
                    print_status(
                        &spinner,
                        Status::Warn,
                        &format!(
                            "{} is still over budget",
                            shorten_path(&outcome.decision.new_path.to_string_lossy(), 80)
                        ),
                    );
                }
            }
            RenameEvent::Renamed(_) => {}
        })
        .run();
    spinner.finish_and_clear();
    set_terminal_title("✅ pathfit");

    let report = result.with_context(|| match &log {
        Some(log) => format!(
            "rename run aborted; completed renames are recorded in {}",
            log.path().display()
        ),
        None => "dry run aborted".to_string(),
    })?;

    if options.json {
        let summary = RenameRunSummary::new(&config, options.dry_run, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if report.outcomes.is_empty() {
        println!("{NOTHING_TO_DO_MESSAGE}");
    }
    println!();
    println!("{}", report.statistics.generate_summary(start_time.elapsed()));
    if let Some(log) = &log {
        println!("📄 Mapping saved to {}", log.path().display());
    }

    Ok(())
}

fn create_log(dir: &Path, root: &Path) -> Result<MappingLog> {
    let dir = std::path::absolute(dir)
        .with_context(|| format!("cannot resolve log directory {}", dir.display()))?;
    // Renaming one of the log's ancestors would break every later append
    if dir.starts_with(root) {
        bail!(
            "log directory {} is inside the tree being renamed; pass --log-dir outside {}",
            dir.display(),
            root.display()
        );
    }
    MappingLog::create_timestamped(&dir)
        .with_context(|| format!("failed to create mapping log in {}", dir.display()))
}
