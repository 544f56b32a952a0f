//! On-disk cache for fetched runtime binaries.
//!
//! The cache is a fixed directory tree keyed by the variant selection:
//!
//! ```text
//! <root>/<version>/<architecture>/<feature-set>/bootstrap
//! ```
//!
//! A binary is fetched and extracted at most once per key; once the
//! `bootstrap` file exists it is trusted as-is (no checksum revalidation)
//! until a caller opts into a forced refresh. The filesystem is the
//! persistence layer: the cache survives process restarts for free.

pub mod entry;
pub mod extract;
pub mod fetch;
pub mod store;

pub use entry::CacheEntry;
pub use fetch::{ArtifactFetcher, HttpFetcher};
pub use store::{clear_cache, list_cached, BinaryCache, CachedBinary};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::variant::{Architecture, FeatureSet, ResolvedVariant, VersionSpec};

/// File name of the runtime binary inside cache directories, archives, and
/// build output.
pub const BINARY_NAME: &str = "bootstrap";

/// Get the default cache root: a fixed location beside the build definition.
pub fn default_cache_root() -> PathBuf {
    PathBuf::from(".skiff-cache")
}

/// Identity of one cached binary: the (version, architecture, feature-set)
/// triple. Equal keys always map to the same on-disk path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub version: VersionSpec,
    pub architecture: Architecture,
    pub feature_set: FeatureSet,
}

impl CacheKey {
    /// The key a resolved variant caches under.
    pub fn of(variant: &ResolvedVariant) -> Self {
        Self {
            version: variant.version.clone(),
            architecture: variant.architecture,
            feature_set: variant.feature_set,
        }
    }

    /// Cache directory for this key under `root`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(self.version.as_str())
            .join(self.architecture.token())
            .join(self.feature_set.token())
    }

    /// Path of the cached binary for this key under `root`.
    pub fn binary_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(BINARY_NAME)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.version.as_str(),
            self.architecture.token(),
            self.feature_set.token()
        )
    }
}
