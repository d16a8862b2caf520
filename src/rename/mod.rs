//! Forward rename pipeline

mod processor;

pub use processor::{RenameEvent, RenameOutcome, RenameReport, RunMode, TreeProcessor};
