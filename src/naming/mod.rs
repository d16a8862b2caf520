//! Name decisions for over-budget paths
//!
//! A path over the full-path budget first gets its name sanitized and
//! truncated ([`fit_name`]). If the parent directory plus that name is still
//! too long, the name is replaced with a digest of the original path
//! ([`fallback_name`]). Both steps resolve collisions in the destination
//! directory by appending `_1`, `_2`, ...

mod digest;
mod fit;
mod sanitize;

pub use digest::{fallback_name, path_digest};
pub use fit::{fit_base, fit_name, truncate_to_bytes};
pub use sanitize::sanitize;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::RenameConfig;
use crate::error::{PathfitError, Result};
use crate::fs::{path_byte_len, FileSystem, PathEntry};

/// How a new name was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sanitized and truncated original name
    Truncated,
    /// Digest of the original full path
    Digest,
}

/// Outcome of deciding a new name for one over-budget entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameDecision {
    pub original: PathBuf,
    /// New basename, extension included
    pub new_name: String,
    /// Parent of the original; renames never move entries between directories
    pub destination: PathBuf,
    pub new_path: PathBuf,
    pub strategy: Strategy,
    /// False when even the fallback name leaves the path over budget, which
    /// happens when the parent directory alone is already too long
    pub within_budget: bool,
}

/// Whether `path` exceeds the full-path budget
pub fn is_over_budget(config: &RenameConfig, path: &Path) -> bool {
    path_byte_len(path) > config.max_full_path
}

/// Decides the new name for `entry`: fit first, digest if still too long
///
/// Fails with [`PathfitError::NonUtf8Path`] for paths the mapping log could
/// not store exactly.
pub fn decide<F>(fs: &F, config: &RenameConfig, entry: &PathEntry) -> Result<RenameDecision>
where
    F: FileSystem + ?Sized,
{
    if entry.path.to_str().is_none() {
        return Err(PathfitError::NonUtf8Path(entry.path.clone()));
    }

    let destination = entry.parent();
    let (stem, ext) = entry.stem_and_extension();
    let clean = sanitize(&stem, &config.illegal_chars);

    let mut strategy = Strategy::Truncated;
    let mut new_name = fit_name(fs, config, &clean, &ext, &destination)?;
    let mut new_path = destination.join(&new_name);

    if is_over_budget(config, &new_path) {
        strategy = Strategy::Digest;
        new_name = fallback_name(fs, config, &entry.path, &ext, &destination)?;
        new_path = destination.join(&new_name);
    }

    Ok(RenameDecision {
        original: entry.path.clone(),
        within_budget: !is_over_budget(config, &new_path),
        new_name,
        destination,
        new_path,
        strategy,
    })
}

/// Returns `make("")`, or `make("_N")` for the smallest N whose name is free
/// in `dir`, trying at most `max_attempts` suffixes
pub(crate) fn resolve_collisions<F>(
    fs: &F,
    dir: &Path,
    base: &str,
    max_attempts: u32,
    make: impl Fn(&str) -> String,
) -> Result<String>
where
    F: FileSystem + ?Sized,
{
    let candidate = make("");
    if !fs.exists(&dir.join(&candidate)) {
        return Ok(candidate);
    }

    for counter in 1..=max_attempts {
        let candidate = make(&format!("_{counter}"));
        if !fs.exists(&dir.join(&candidate)) {
            return Ok(candidate);
        }
    }

    Err(PathfitError::CollisionsExhausted {
        dir: dir.to_path_buf(),
        base: base.to_string(),
        attempts: max_attempts,
    })
}
