//! Reverse pipeline: undo the renames recorded in a mapping log

mod restorer;

pub use restorer::{ReplayOrder, RestoreReport, Restorer, RowOutcome, RowReport};
