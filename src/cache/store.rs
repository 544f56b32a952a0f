//! Cache storage implementation.
//!
//! [`BinaryCache::ensure`] makes a variant's binary present on disk and
//! returns its path. The presence check and the fetch-extract sequence form
//! one critical section per cache key:
//!
//! - an in-process mutex per key serializes concurrent `ensure` calls, so a
//!   process fetches each key at most once;
//! - extraction lands in a temporary sibling directory and the binary is
//!   renamed into place, so a reader in another process never observes a
//!   partially written `bootstrap` and racing writers never co-extract into
//!   the same path.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::entry::CacheEntry;
use super::extract::extract_binary;
use super::fetch::ArtifactFetcher;
use super::{CacheKey, BINARY_NAME};
use crate::error::Result;
use crate::variant::ResolvedVariant;

/// Storage for cached runtime binaries.
pub struct BinaryCache {
    /// Root directory for the cache tree.
    root: PathBuf,
    /// Archive source, injected so tests can count fetches.
    fetcher: Box<dyn ArtifactFetcher>,
    /// Refetch even when a binary is already present.
    force_refresh: bool,
    /// One lock per cache key; `ensure` holds it across check-fetch-extract.
    locks: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl BinaryCache {
    /// Create a new cache rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, fetcher: Box<dyn ArtifactFetcher>) -> Self {
        Self {
            root: root.into(),
            fetcher,
            force_refresh: false,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Refetch binaries even when already cached.
    ///
    /// The presence check normally trusts an existing `bootstrap` without
    /// revalidating content; this knob is the escape hatch.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the binary for `key` lives at, whether or not it exists yet.
    pub fn binary_path(&self, key: &CacheKey) -> PathBuf {
        key.binary_path(&self.root)
    }

    /// Ensure the variant's binary is present and return its path.
    ///
    /// Fetches and extracts at most once per key; subsequent calls (and
    /// calls in later processes) return the existing path without touching
    /// the network.
    pub fn ensure(&self, variant: &ResolvedVariant) -> Result<PathBuf> {
        let key = CacheKey::of(variant);
        let slot = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        // A poisoned slot still guards a consistent directory: rename-into-
        // place never leaves a partial binary behind.
        let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = key.dir(&self.root);
        let binary = dir.join(BINARY_NAME);

        if binary.exists() && !self.force_refresh {
            debug!(key = %key, path = %binary.display(), "cache hit");
            return Ok(binary);
        }

        info!(key = %key, url = %variant.download_url, "fetching runtime binary");
        let archive = self.fetcher.fetch(&variant.download_url)?;

        fs::create_dir_all(&dir)?;
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&dir)?;
        let extracted = extract_binary(&archive, staging.path(), &variant.download_url)?;
        fs::rename(&extracted, &binary)?;

        let size = fs::metadata(&binary).map(|m| m.len()).unwrap_or(0);
        let _ = CacheEntry::new(
            variant.identifier.as_str(),
            variant.download_url.as_str(),
            size,
        )
        .write(&dir);

        debug!(key = %key, bytes = size, "cached runtime binary");
        Ok(binary)
    }
}

/// One cached binary found under a cache root.
#[derive(Debug)]
pub struct CachedBinary {
    /// Cache key segments relative to the root, e.g. `latest/arm64/standard`.
    pub key_path: String,
    /// Path of the binary on disk.
    pub binary_path: PathBuf,
    /// Size of the binary in bytes.
    pub size_bytes: u64,
    /// Provenance sidecar, when present.
    pub entry: Option<CacheEntry>,
}

/// List every cached binary under `root`, sorted by key path.
pub fn list_cached(root: &Path) -> Result<Vec<CachedBinary>> {
    let mut found = Vec::new();

    for version in subdirs(root)? {
        for arch in subdirs(&version)? {
            for feature in subdirs(&arch)? {
                let binary_path = feature.join(BINARY_NAME);
                if !binary_path.exists() {
                    continue;
                }
                let size_bytes = fs::metadata(&binary_path)?.len();
                let key_path = feature
                    .strip_prefix(root)
                    .unwrap_or(feature.as_path())
                    .to_string_lossy()
                    .replace('\\', "/");
                found.push(CachedBinary {
                    key_path,
                    binary_path,
                    size_bytes,
                    entry: CacheEntry::read(&feature),
                });
            }
        }
    }

    found.sort_by(|a, b| a.key_path.cmp(&b.key_path));
    Ok(found)
}

/// Remove the whole cache tree. Returns whether anything existed.
pub fn clear_cache(root: &Path) -> Result<bool> {
    if !root.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(root)?;
    Ok(true)
}

fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}
