//! Resolve command implementation.
//!
//! Prints the canonical identifier, download URL, and ES target for a
//! variant selection without touching the network.

use console::style;

use crate::cli::args::{Cli, ResolveArgs};
use crate::error::Result;
use crate::variant::{resolve, BinarySource, VersionSpec};

/// Run `skiff resolve`.
pub fn run(args: &ResolveArgs, _cli: &Cli) -> Result<()> {
    let version = VersionSpec::parse(&args.variant.version);
    let variant = resolve(
        &BinarySource::default(),
        &version,
        args.variant.arch,
        args.variant.sdk,
    );

    if args.json {
        let output = serde_json::json!({
            "identifier": variant.identifier,
            "download_url": variant.download_url,
            "es_target": variant.es_target.as_str(),
            "version": variant.version.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&output).map_err(anyhow::Error::from)?);
        return Ok(());
    }

    println!("{}  {}", style("binary").dim(), variant.identifier);
    println!("{}  {}", style("url").dim(), variant.download_url);
    println!("{}  {}", style("target").dim(), variant.es_target.as_str());
    Ok(())
}
