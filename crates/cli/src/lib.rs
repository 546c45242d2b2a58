//! `linegroup-cli` library half: pieces of the CLI that integration tests
//! exercise directly.

pub mod paths;
