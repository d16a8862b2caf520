//! Error types shared by the rename and restore pipelines

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathfitError {
    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("mapping log error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no free name for '{base}' in {} after {attempts} attempts", dir.display())]
    CollisionsExhausted {
        dir: PathBuf,
        base: String,
        attempts: u32,
    },

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("mapping log not found: {}", .0.display())]
    LogNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PathfitError {
    /// Wraps an I/O error with the operation and path it came from
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PathfitError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PathfitError>;
