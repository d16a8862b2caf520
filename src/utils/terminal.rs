//! Terminal title handling

use std::io::{IsTerminal, Write};

/// Sets the terminal title when stdout is an interactive terminal
pub fn set_terminal_title(title: &str) {
    let mut stdout = std::io::stdout();
    if !stdout.is_terminal() {
        return;
    }
    // OSC 0 sets icon name and window title
    print!("\x1b]0;{title}\x07");
    let _ = stdout.flush();
}
