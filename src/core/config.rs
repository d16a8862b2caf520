//! Configuration constants and per-run settings

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PathfitError, Result};

// Byte budgets
//
// OneDrive rejects full paths above roughly 1000 bytes and single names above
// 255; both defaults keep a margin below those limits.
pub const DEFAULT_MAX_FULL_PATH: usize = 980;
pub const DEFAULT_MAX_NAME_BYTES: usize = 240;

// Characters illegal on Windows or macOS filesystems
pub const DEFAULT_ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

// Upper bound on `_N` suffixes tried before giving up on a directory
pub const DEFAULT_MAX_COLLISION_ATTEMPTS: u32 = 10_000;

// Sync folder under the home directory used when no root is given
pub const DEFAULT_ROOT_DIR_NAME: &str = "OneDrive";

// Placeholder base when nothing of the original name fits
pub const PLACEHOLDER_BASE: &str = "_";

// Hex characters kept from the path digest
pub const DIGEST_HEX_LEN: usize = 10;

// Mapping log naming
pub const LOG_FILE_PREFIX: &str = "rename_backup_";
pub const LOG_FILE_EXTENSION: &str = "csv";
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const LOG_HEADER: [&str; 2] = ["original_path", "new_path"];

// UI Constants
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for over-long paths...";
pub const NOTHING_TO_DO_MESSAGE: &str = "No paths exceed the configured budgets.";
pub const SPINNER_TEMPLATE: &str = "{spinner} {wide_msg}";
pub const PATH_DISPLAY_WIDTH: usize = 60;

// Pre-allocation hint for walk results
pub const ESTIMATED_ENTRY_COUNT: usize = 1024;

/// Settings for one rename run, threaded through every component
#[derive(Clone, Debug, PartialEq)]
pub struct RenameConfig {
    /// Tree that gets shortened in place
    pub root: PathBuf,
    /// Budget for a full path, in encoded bytes
    pub max_full_path: usize,
    /// Budget for a single name including its extension, in encoded bytes
    pub max_name_bytes: usize,
    /// Characters deleted from names before fitting
    pub illegal_chars: Vec<char>,
    /// How many `_N` suffixes to try before failing
    pub max_collision_attempts: u32,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_full_path: DEFAULT_MAX_FULL_PATH,
            max_name_bytes: DEFAULT_MAX_NAME_BYTES,
            illegal_chars: DEFAULT_ILLEGAL_CHARS.to_vec(),
            max_collision_attempts: DEFAULT_MAX_COLLISION_ATTEMPTS,
        }
    }
}

impl RenameConfig {
    /// Default settings rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Rejects settings no run could work with
    pub fn validate(&self) -> Result<()> {
        if self.max_full_path == 0 {
            return Err(PathfitError::Config("max_full_path must be positive".into()));
        }
        if self.max_name_bytes == 0 {
            return Err(PathfitError::Config("max_name_bytes must be positive".into()));
        }
        if self.max_collision_attempts == 0 {
            return Err(PathfitError::Config(
                "max_collision_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Applies the keys present in `file` on top of these settings
    pub fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(root) = file.root {
            self.root = root;
        }
        if let Some(max_full_path) = file.max_full_path {
            self.max_full_path = max_full_path;
        }
        if let Some(max_name_bytes) = file.max_name_bytes {
            self.max_name_bytes = max_name_bytes;
        }
        if let Some(chars) = file.illegal_chars {
            self.illegal_chars = chars.chars().collect();
        }
        if let Some(attempts) = file.max_collision_attempts {
            self.max_collision_attempts = attempts;
        }
        self
    }
}

/// On-disk TOML form of [`RenameConfig`]; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub root: Option<PathBuf>,
    pub max_full_path: Option<usize>,
    pub max_name_bytes: Option<usize>,
    pub illegal_chars: Option<String>,
    pub max_collision_attempts: Option<u32>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PathfitError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| PathfitError::io("read config", path, e))?;
        Self::parse(&content)
    }
}

/// `~/OneDrive`, or `./OneDrive` when no home directory is known
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIR_NAME)
}
