//! Shared runtime layers.
//!
//! When several build targets reference the same cached binary, embedding a
//! private copy in each bundle wastes space. The registry hands out one
//! shared [`LayerArtifact`] per distinct binary path instead; the deploy
//! backend packages the layer once and every target attaches the same
//! handle.
//!
//! The registry is a per-build-session value: construct one, share it by
//! reference across targets, and drop it with the session. There is no
//! eviction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// A shareable packaging unit wrapping one runtime binary.
///
/// The content root is the binary's parent directory, so the packaged
/// layer carries exactly the runtime payload living beside the binary.
#[derive(Debug)]
pub struct LayerArtifact {
    id: String,
    content_root: PathBuf,
    sequence: u64,
}

impl LayerArtifact {
    /// Identifier of this layer, unique within the registry.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Directory whose contents the layer packages.
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Creation order within the registry, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    by_path: HashMap<String, Arc<LayerArtifact>>,
    next_sequence: u64,
}

/// Process-wide map from binary path to its shared layer.
///
/// Memoized by path string identity: the same path never produces two
/// layers, distinct paths always produce distinct layers. Safe to call from
/// parallel target evaluation within one process.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    inner: Mutex<RegistryInner>,
}

impl LayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the layer for `binary_path`, creating it on first request.
    pub fn get_or_create(&self, binary_path: &Path) -> Arc<LayerArtifact> {
        let key = binary_path.to_string_lossy().into_owned();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = inner.by_path.get(&key) {
            return Arc::clone(existing);
        }

        inner.next_sequence += 1;
        let sequence = inner.next_sequence;
        let content_root = binary_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let artifact = Arc::new(LayerArtifact {
            id: format!("runtime-layer-{sequence}"),
            content_root,
            sequence,
        });
        debug!(id = %artifact.id, path = %binary_path.display(), "created shared layer");

        inner.by_path.insert(key, Arc::clone(&artifact));
        artifact
    }

    /// Number of distinct layers created so far.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_path
            .len()
    }

    /// Whether no layer has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_returns_same_handle() {
        let registry = LayerRegistry::new();
        let a = registry.get_or_create(Path::new("/cache/latest/x64/standard/bootstrap"));
        let b = registry.get_or_create(Path::new("/cache/latest/x64/standard/bootstrap"));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_paths_get_distinct_layers() {
        let registry = LayerRegistry::new();
        let a = registry.get_or_create(Path::new("/cache/latest/x64/standard/bootstrap"));
        let b = registry.get_or_create(Path::new("/cache/latest/arm64/standard/bootstrap"));

        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn content_root_is_parent_of_binary() {
        let registry = LayerRegistry::new();
        let layer = registry.get_or_create(Path::new("/cache/latest/x64/standard/bootstrap"));

        assert_eq!(
            layer.content_root(),
            Path::new("/cache/latest/x64/standard")
        );
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let registry = LayerRegistry::new();
        let a = registry.get_or_create(Path::new("/a/bootstrap"));
        let b = registry.get_or_create(Path::new("/b/bootstrap"));
        let c = registry.get_or_create(Path::new("/c/bootstrap"));

        assert_eq!(a.sequence(), 1);
        assert_eq!(b.sequence(), 2);
        assert_eq!(c.sequence(), 3);
        assert_eq!(c.id(), "runtime-layer-3");
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = LayerRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_requests_for_one_path_create_one_layer() {
        let registry = Arc::new(LayerRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.get_or_create(Path::new("/shared/bootstrap"))
                })
            })
            .collect();

        let layers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        for layer in &layers[1..] {
            assert!(Arc::ptr_eq(&layers[0], layer));
        }
    }
}
