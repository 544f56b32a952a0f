//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::variant::{Architecture, FeatureSet};

/// Skiff - custom-runtime provisioning for serverless builds.
#[derive(Debug, Parser)]
#[command(name = "skiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache directory for fetched runtime binaries
    #[arg(long, global = true, env = "SKIFF_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a variant to its identifier, download URL, and ES target
    Resolve(ResolveArgs),

    /// Fetch a runtime binary into the local cache
    Fetch(FetchArgs),

    /// Inspect or clear the binary cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Variant selection shared by `resolve` and `fetch`.
#[derive(Debug, Clone, clap::Args)]
pub struct VariantArgs {
    /// Runtime release tag, or "latest"
    #[arg(long, default_value = "latest")]
    pub version: String,

    /// Target CPU architecture
    #[arg(long, value_enum, default_value = "x64")]
    pub arch: Architecture,

    /// SDK feature set embedded in the binary
    #[arg(long, value_enum, default_value = "standard")]
    pub sdk: FeatureSet,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fetch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    /// Re-download even if the binary is already cached
    #[arg(long)]
    pub force: bool,

    /// Download timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

/// Arguments for the `cache` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show cached binaries.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove the cache tree.
    Clear {
        /// Actually remove; without this the command only reports.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_with_defaults() {
        let cli = Cli::try_parse_from(["skiff", "resolve"]).unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.variant.version, "latest");
                assert_eq!(args.variant.arch, Architecture::X64);
                assert_eq!(args.variant.sdk, FeatureSet::Standard);
                assert!(!args.json);
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }

    #[test]
    fn parses_fetch_selection() {
        let cli = Cli::try_parse_from([
            "skiff", "fetch", "--version", "v0.2.0", "--arch", "arm64", "--sdk", "full", "--force",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.variant.version, "v0.2.0");
                assert_eq!(args.variant.arch, Architecture::Arm64);
                assert_eq!(args.variant.sdk, FeatureSet::Full);
                assert!(args.force);
                assert_eq!(args.timeout, 30);
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_architecture() {
        assert!(Cli::try_parse_from(["skiff", "resolve", "--arch", "mips"]).is_err());
    }

    #[test]
    fn global_cache_dir_flag() {
        let cli = Cli::try_parse_from(["skiff", "--cache-dir", "/tmp/c", "cache", "status"]).unwrap();
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
    }
}
