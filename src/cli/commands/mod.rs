//! Subcommand implementations.

pub mod cache;
pub mod completions;
pub mod fetch;
pub mod resolve;
