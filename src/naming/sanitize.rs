//! Removal of characters that some target filesystems reject

/// Deletes every character of `illegal` from `name`
pub fn sanitize(name: &str, illegal: &[char]) -> String {
    name.chars().filter(|c| !illegal.contains(c)).collect()
}
