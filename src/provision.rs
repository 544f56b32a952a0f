//! Build-target provisioning.
//!
//! [`Provisioner::provision`] is the produced interface of this crate: a
//! drop-in step that configures one build target to run on the custom
//! runtime. It wires the variant resolver, the binary cache, the optional
//! shared-layer registry, and the pipeline composer, then points the
//! target's runtime identifier at the self-contained executable.
//!
//! The external build pipeline stays a black box behind [`BuildTarget`];
//! its errors propagate unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::BinaryCache;
use crate::error::Result;
use crate::layer::{LayerArtifact, LayerRegistry};
use crate::pipeline::{compose, BundlingConfig, BundlingOverrides};
use crate::variant::{resolve, Architecture, BinarySource, FeatureSet, ResolvedVariant, VersionSpec};

/// Runtime identifier signaling a self-contained executable to the
/// deployment system, instead of a managed language interpreter.
pub const PROVIDED_RUNTIME: &str = "provided.al2023";

/// The consumed build-pipeline construct.
///
/// Implementations wrap whatever actually builds and packages the function;
/// this crate only drives the configuration surface.
pub trait BuildTarget {
    /// Apply the composed bundling configuration.
    fn apply_bundling(&mut self, bundling: &BundlingConfig) -> Result<()>;

    /// Attach a shared packaging unit to the target.
    fn attach_layer(&mut self, layer: Arc<LayerArtifact>) -> Result<()>;

    /// Override the target's declared runtime identifier.
    fn set_runtime(&mut self, runtime: &str);
}

/// Selection and adjustment options for one build target.
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Runtime release to ship.
    pub version: VersionSpec,
    /// CPU architecture of the target.
    pub architecture: Architecture,
    /// SDK feature set embedded in the binary.
    pub feature_set: FeatureSet,
    /// Ship the binary through a shared layer instead of copying it into
    /// the bundle.
    pub use_layer: bool,
    /// Explicit local binary, bypassing resolution-by-download and the
    /// cache entirely.
    pub binary_path: Option<PathBuf>,
    /// Caller adjustments to the bundling baseline.
    pub overrides: BundlingOverrides,
}

/// Everything provisioning decided for one target.
#[derive(Debug)]
pub struct ProvisionedRuntime {
    /// The resolved binary variant.
    pub variant: ResolvedVariant,
    /// Local path of the runtime binary.
    pub binary_path: PathBuf,
    /// Shared layer, when layer delivery was requested.
    pub layer: Option<Arc<LayerArtifact>>,
    /// The configuration applied to the target.
    pub bundling: BundlingConfig,
}

/// Provisions build targets against one cache and one layer registry.
pub struct Provisioner<'a> {
    source: BinarySource,
    cache: &'a BinaryCache,
    layers: &'a LayerRegistry,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner over the default release line.
    pub fn new(cache: &'a BinaryCache, layers: &'a LayerRegistry) -> Self {
        Self {
            source: BinarySource::default(),
            cache,
            layers,
        }
    }

    /// Use a different release line (mirror or fork).
    pub fn with_source(mut self, source: BinarySource) -> Self {
        self.source = source;
        self
    }

    /// Configure `target` to run on the selected runtime variant.
    pub fn provision(
        &self,
        target: &mut dyn BuildTarget,
        options: &ProvisionOptions,
    ) -> Result<ProvisionedRuntime> {
        let variant = resolve(
            &self.source,
            &options.version,
            options.architecture,
            options.feature_set,
        );
        info!(identifier = %variant.identifier, "provisioning runtime");

        let binary_path = match &options.binary_path {
            Some(path) => {
                debug!(path = %path.display(), "using explicit local binary");
                path.clone()
            }
            None => self.cache.ensure(&variant)?,
        };

        let layer = options
            .use_layer
            .then(|| self.layers.get_or_create(&binary_path));

        let bundling = compose(&variant, &binary_path, options.use_layer, &options.overrides)?;

        target.apply_bundling(&bundling)?;
        if let Some(layer) = &layer {
            target.attach_layer(Arc::clone(layer))?;
        }
        // The runtime override happens last, once the underlying construct
        // exists with its default interpreter identifier.
        target.set_runtime(PROVIDED_RUNTIME);

        Ok(ProvisionedRuntime {
            variant,
            binary_path,
            layer,
            bundling,
        })
    }
}
