//! Command-line tooling.

pub mod cli;
