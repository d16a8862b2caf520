//! # goobits-pathfit
//!
//! `goobits-pathfit` shortens files and directories whose paths are too long
//! for a cloud sync client to mirror. It powers the `pathfit` CLI tool.
//!
//! ## Core Features
//!
//! - **Two byte budgets**: one for the full path, one for a single name.
//! - **Safe truncation**: names are cut on character boundaries, never
//!   mid-character, after illegal characters are removed.
//! - **Digest fallback**: when truncation is not enough, the name becomes a
//!   short digest of the original path.
//! - **Reversible**: every rename is appended to a CSV mapping log that the
//!   restore command replays.
//!
//! ## Example
//!
//! ```rust,no_run
//! use goobits_pathfit::core::RenameConfig;
//! use goobits_pathfit::fs::OsFileSystem;
//! use goobits_pathfit::mapping::MappingLog;
//! use goobits_pathfit::rename::{RunMode, TreeProcessor};
//!
//! fn main() -> goobits_pathfit::error::Result<()> {
//!     let config = RenameConfig::with_root("/home/me/OneDrive");
//!     let log = MappingLog::create_timestamped(std::path::Path::new("."))?;
//!     let report = TreeProcessor::new(&OsFileSystem::new(), &config, RunMode::Apply(&log)).run()?;
//!     println!("{} paths renamed", report.statistics.total_renamed());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod error;
pub mod fs;
pub mod mapping;
pub mod naming;
pub mod rename;
pub mod restore;
pub mod utils;
