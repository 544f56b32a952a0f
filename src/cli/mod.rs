//! Command-line interface.
//!
//! The CLI wraps the library for build scripts and CI: resolving variants,
//! prefetching binaries into the cache, and inspecting or clearing the
//! cache tree.

pub mod args;
pub mod commands;

pub use args::{CacheSubcommand, Cli, Commands};
