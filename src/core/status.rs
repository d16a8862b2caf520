//! Status tags printed for each path a run touches

/// Result of handling one path, as shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// A file was renamed (or would be, in a dry run)
    File,
    /// A directory was renamed (or would be, in a dry run)
    Dir,
    /// Restore target no longer exists
    Skip,
    /// Restore destination is already taken
    Exists,
    /// A path was put back under its original name
    Restored,
    /// A rename still leaves the path over budget
    Warn,
    /// An operation failed
    Error,
}

impl Status {
    /// Returns the bracketed tag that prefixes output lines
    pub fn tag(&self) -> &'static str {
        match self {
            Status::File => "[FILE]",
            Status::Dir => "[DIR]",
            Status::Skip => "[SKIP]",
            Status::Exists => "[EXISTS]",
            Status::Restored => "[RESTORED]",
            Status::Warn => "[WARN]",
            Status::Error => "[ERROR]",
        }
    }

    /// Whether the line belongs on stderr
    pub fn is_problem(&self) -> bool {
        matches!(self, Status::Warn | Status::Error)
    }
}
