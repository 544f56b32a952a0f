//! Fetch command implementation.
//!
//! Prefetches a runtime binary into the cache so subsequent build passes
//! (or other CI jobs sharing the cache volume) hit disk instead of the
//! network.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::{BinaryCache, HttpFetcher};
use crate::cli::args::{Cli, FetchArgs};
use crate::error::Result;
use crate::variant::{resolve, BinarySource, VersionSpec};

/// Run `skiff fetch`.
pub fn run(args: &FetchArgs, cli: &Cli, cache_root: &std::path::Path) -> Result<()> {
    let version = VersionSpec::parse(&args.variant.version);
    let variant = resolve(
        &BinarySource::default(),
        &version,
        args.variant.arch,
        args.variant.sdk,
    );

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(args.timeout));
    let cache = BinaryCache::new(cache_root, Box::new(fetcher)).with_force_refresh(args.force);

    let spinner = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}").unwrap());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };
    spinner.set_message(format!("Fetching {}", variant.identifier));

    let result = cache.ensure(&variant);
    spinner.finish_and_clear();

    let path = result?;
    if !cli.quiet {
        println!(
            "{} {} {}",
            style("✓").green(),
            variant.identifier,
            style(path.display()).dim()
        );
    }
    Ok(())
}
