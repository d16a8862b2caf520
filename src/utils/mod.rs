pub(crate) mod fs;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use fs::{format_byte_len, shorten_path};
pub use terminal::set_terminal_title;
