//! Digest-based fallback names for paths that stay over budget

use sha2::{Digest, Sha256};
use std::path::Path;

use super::resolve_collisions;
use crate::core::{RenameConfig, DIGEST_HEX_LEN};
use crate::error::Result;
use crate::fs::FileSystem;

/// First [`DIGEST_HEX_LEN`] hex characters of SHA-256 over the full path
///
/// Only used to shorten names; the mapping log is what makes the rename
/// reversible.
pub fn path_digest(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..DIGEST_HEX_LEN].to_string()
}

/// `<digest><ext>`, or `<digest>_N<ext>` when taken in `dir`
pub fn fallback_name<F>(
    fs: &F,
    config: &RenameConfig,
    original: &Path,
    ext: &str,
    dir: &Path,
) -> Result<String>
where
    F: FileSystem + ?Sized,
{
    let digest = path_digest(original);
    resolve_collisions(fs, dir, &digest, config.max_collision_attempts, |suffix| {
        format!("{digest}{suffix}{ext}")
    })
}
