//! Truncating names to the single-name byte budget

use std::path::Path;

use super::resolve_collisions;
use crate::core::{RenameConfig, PLACEHOLDER_BASE};
use crate::error::Result;
use crate::fs::FileSystem;

/// Longest prefix of `s` that fits in `max_bytes` without splitting a
/// character
pub fn truncate_to_bytes(s: &str, max_bytes: usize) -> &str {
    let mut end = 0;
    for (idx, ch) in s.char_indices() {
        let next = idx + ch.len_utf8();
        if next > max_bytes {
            break;
        }
        end = next;
    }
    &s[..end]
}

/// Base that fits in `budget` bytes, or the placeholder when nothing fits
pub fn fit_base(clean: &str, budget: usize) -> String {
    let base = truncate_to_bytes(clean, budget);
    if base.is_empty() {
        PLACEHOLDER_BASE.to_string()
    } else {
        base.to_string()
    }
}

/// Fits `clean` + `ext` into `max_name_bytes` and picks the first name not
/// taken in `dir`
///
/// A collision suffix `_N` goes between base and extension, and the base is
/// shortened further so the suffixed name still fits.
pub fn fit_name<F>(
    fs: &F,
    config: &RenameConfig,
    clean: &str,
    ext: &str,
    dir: &Path,
) -> Result<String>
where
    F: FileSystem + ?Sized,
{
    let fitted = |suffix: &str| {
        let budget = config
            .max_name_bytes
            .saturating_sub(ext.len() + suffix.len());
        format!("{}{suffix}{ext}", fit_base(clean, budget))
    };

    resolve_collisions(fs, dir, clean, config.max_collision_attempts, fitted)
}
