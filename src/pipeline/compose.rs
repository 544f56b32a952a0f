//! Bundling configuration assembly.
//!
//! [`compose`] layers caller overrides over a baseline configuration for
//! the resolved variant.
//!
//! # Merge Rules
//!
//! - Scalar override fields win wherever they are set
//! - An external-module override replaces the table-derived list entirely
//! - The hook triple is composed, never replaced: injected steps run first,
//!   then the caller's, per stage

use std::path::Path;

use tracing::debug;

use super::exclude::external_modules;
use super::hooks::{HookChain, HookStep};
use crate::error::Result;
use crate::variant::{EsTarget, ResolvedVariant};

/// Module format of the bundled handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ECMAScript modules.
    #[default]
    Esm,
    /// CommonJS, for handlers that cannot move off `require`.
    Cjs,
}

impl OutputFormat {
    /// The bundler-facing format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
        }
    }
}

/// The assembled configuration handed to the external build pipeline.
///
/// Built fresh per build target; not mutated after composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlingConfig {
    /// ECMAScript level the bundler emits.
    pub es_target: EsTarget,
    /// Module format of the bundle.
    pub format: OutputFormat,
    /// Whether the bundle is minified.
    pub minify: bool,
    /// Modules excluded from the bundle (embedded in the runtime).
    pub external_modules: Vec<String>,
    /// Composed lifecycle hooks.
    pub hooks: HookChain,
    /// Run the bundler inside a container even on matching hosts.
    pub force_docker_bundling: bool,
}

/// Caller adjustments to the baseline configuration.
///
/// Unset fields keep the baseline; `hooks` carries the caller's own steps
/// and is composed with (never replaces) the injected ones.
#[derive(Debug, Clone, Default)]
pub struct BundlingOverrides {
    pub es_target: Option<EsTarget>,
    pub format: Option<OutputFormat>,
    pub minify: Option<bool>,
    pub external_modules: Option<Vec<String>>,
    pub force_docker_bundling: Option<bool>,
    pub hooks: HookChain,
}

/// Compose the bundling configuration for one build target.
///
/// When `via_layer` is set the binary reaches the build output through a
/// shared layer, so no copy step is injected; otherwise an after-bundling
/// step copies `binary_path` into the output as `bootstrap`.
pub fn compose(
    variant: &ResolvedVariant,
    binary_path: &Path,
    via_layer: bool,
    overrides: &BundlingOverrides,
) -> Result<BundlingConfig> {
    overrides.hooks.validate()?;

    let mut injected = HookChain::new();
    if !via_layer {
        injected.after_bundling.push(HookStep::InstallBinary {
            source: binary_path.to_path_buf(),
        });
    }
    let hooks = injected.compose(&overrides.hooks);

    let config = BundlingConfig {
        es_target: overrides.es_target.unwrap_or(variant.es_target),
        format: overrides.format.unwrap_or_default(),
        minify: overrides.minify.unwrap_or(true),
        external_modules: overrides
            .external_modules
            .clone()
            .unwrap_or_else(|| external_modules(variant.feature_set)),
        force_docker_bundling: overrides.force_docker_bundling.unwrap_or(false),
        hooks,
    };
    debug!(
        identifier = %variant.identifier,
        target = config.es_target.as_str(),
        via_layer,
        "composed bundling config"
    );
    Ok(config)
}
