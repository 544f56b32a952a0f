//! Cache metadata sidecars.
//!
//! Each cached binary gets a small JSON record next to it describing where
//! it came from and when. The record is informational (it feeds the
//! `cache status` view); cache hits are decided by the presence of the
//! binary alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Sidecar file name, stored alongside the binary.
pub const SIDECAR_NAME: &str = "bootstrap.meta.json";

/// Provenance record for one cached binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Canonical binary identifier, e.g. `llrt-lambda-arm64`.
    pub identifier: String,
    /// URL the archive was fetched from.
    pub source_url: String,
    /// Size of the extracted binary in bytes.
    pub size_bytes: u64,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(
        identifier: impl Into<String>,
        source_url: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            source_url: source_url.into(),
            size_bytes,
            fetched_at: Utc::now(),
        }
    }

    /// Write the sidecar into a cache directory.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize cache metadata: {e}"))?;
        fs::write(dir.join(SIDECAR_NAME), json)?;
        Ok(())
    }

    /// Read the sidecar from a cache directory, if present and readable.
    pub fn read(dir: &Path) -> Option<Self> {
        let json = fs::read_to_string(dir.join(SIDECAR_NAME)).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.fetched_at)
    }
}
