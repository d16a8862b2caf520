//! Spinner and line output for long-running passes

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use super::config::{PATH_DISPLAY_WIDTH, SPINNER_TEMPLATE};
use super::status::Status;
use crate::utils::shorten_path;

const SPINNER_TICK_MS: u64 = 120;

/// Creates the spinner that shows which path is being examined
///
/// indicatif hides it on its own when stdout is not a terminal.
pub fn create_spinner(visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template(SPINNER_TEMPLATE)?);
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    Ok(pb)
}

/// Shows `path` as the entry currently being looked at
pub fn show_examining(pb: &ProgressBar, path: &Path) {
    pb.set_message(shorten_path(&path.to_string_lossy(), PATH_DISPLAY_WIDTH));
}

/// Prints a status line without tearing the spinner
///
/// `suspend` still runs the closure when the bar is hidden, unlike
/// `ProgressBar::println`.
pub fn print_status(pb: &ProgressBar, status: Status, message: &str) {
    pb.suspend(|| {
        if status.is_problem() {
            eprintln!("{} {}", status.tag(), message);
        } else {
            println!("{} {}", status.tag(), message);
        }
    });
}
