//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Run configuration and its TOML form
//! - Tree walking
//! - Rename and restore statistics
//! - Status tags and progress output
//!
//! Internal implementation details are not exposed through this API.

// Configuration
pub use super::config::{default_root, ConfigFile, RenameConfig};
pub use super::config::{
    DEFAULT_ILLEGAL_CHARS, DEFAULT_MAX_COLLISION_ATTEMPTS, DEFAULT_MAX_FULL_PATH,
    DEFAULT_MAX_NAME_BYTES, DIGEST_HEX_LEN, PLACEHOLDER_BASE,
};

// Mapping log naming
pub use super::config::{LOG_FILE_EXTENSION, LOG_FILE_PREFIX, LOG_HEADER, LOG_TIMESTAMP_FORMAT};

// User-facing messages
pub use super::config::{NOTHING_TO_DO_MESSAGE, SCANNING_MESSAGE};

// Statistics and status
pub use super::stats::{RenameStatistics, RestoreStatistics};
pub use super::status::Status;

// Walking
pub use super::walk::walk_tree;

// Terminal utilities (re-exported from utils)
pub use crate::utils::set_terminal_title;

// Internal helpers for command modules
pub(crate) use super::progress::{create_spinner, print_status, show_examining};
