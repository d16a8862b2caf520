//! Mapping log: the durable record of every rename a run performed

mod log;

pub use log::{log_file_name, read_log, LogRow, MappingLog, MappingRecord};
