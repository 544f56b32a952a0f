//! Cache command implementation.
//!
//! Provides `skiff cache status` and `skiff cache clear`.

use console::style;

use crate::cache::{clear_cache, list_cached};
use crate::cli::args::{CacheSubcommand, Cli};
use crate::error::Result;

/// Run `skiff cache <subcommand>`.
pub fn run(command: &CacheSubcommand, cli: &Cli, cache_root: &std::path::Path) -> Result<()> {
    match command {
        CacheSubcommand::Status { json } => status(cache_root, *json),
        CacheSubcommand::Clear { force } => clear(cache_root, *force, cli.quiet),
    }
}

fn status(cache_root: &std::path::Path, json: bool) -> Result<()> {
    let cached = list_cached(cache_root)?;

    if json {
        let entries: Vec<_> = cached
            .iter()
            .map(|binary| {
                serde_json::json!({
                    "key": binary.key_path,
                    "path": binary.binary_path,
                    "size_bytes": binary.size_bytes,
                    "source_url": binary.entry.as_ref().map(|e| e.source_url.clone()),
                    "fetched_at": binary.entry.as_ref().map(|e| e.fetched_at),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?
        );
        return Ok(());
    }

    if cached.is_empty() {
        println!("Cache is empty ({})", cache_root.display());
        return Ok(());
    }

    println!("{} cached binaries in {}:\n", cached.len(), cache_root.display());
    for binary in &cached {
        println!("  {}  {}", binary.key_path, style(format!("{} bytes", binary.size_bytes)).dim());
        if let Some(entry) = &binary.entry {
            println!("    {}", style(&entry.source_url).dim());
        }
    }
    Ok(())
}

fn clear(cache_root: &std::path::Path, force: bool, quiet: bool) -> Result<()> {
    if !force {
        let count = list_cached(cache_root)?.len();
        println!(
            "Would remove {} cached binaries under {} (pass --force to remove)",
            count,
            cache_root.display()
        );
        return Ok(());
    }

    let removed = clear_cache(cache_root)?;
    if !quiet {
        if removed {
            println!("{} Cleared {}", style("✓").green(), cache_root.display());
        } else {
            println!("Cache is already empty ({})", cache_root.display());
        }
    }
    Ok(())
}
