//! Command handlers behind the `pathfit` binary

pub mod rename;
pub mod restore;
