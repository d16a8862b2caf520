//! Display helpers for paths

use crate::naming::truncate_to_bytes;

/// Shortens a long path for display, keeping its last two components
///
/// A final component that is still wider than `max_length` is cut at a
/// character boundary and marked with an ellipsis.
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let tail = match components.as_slice() {
        [] => return path.to_string(),
        [only] => only.to_string(),
        [.., parent, last] => format!("{parent}/{last}"),
    };

    let shortened = format!(".../{tail}");
    if shortened.len() <= max_length {
        return shortened;
    }

    let last = components[components.len() - 1];
    format!("...{}…", truncate_to_bytes(last, max_length.saturating_sub(6)))
}

/// Human-readable byte count used in rename lines (`1000B`)
pub fn format_byte_len(len: usize) -> String {
    format!("{len}B")
}
