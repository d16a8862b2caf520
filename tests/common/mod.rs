//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;

pub use self::fixtures::{dir_of_len, TestTree, TestTreeBuilder};
