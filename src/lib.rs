//! Skiff - custom-runtime provisioning for serverless function builds.
//!
//! Skiff ships a lightweight JavaScript runtime binary (the LLRT binary
//! family) into serverless build pipelines in place of the platform's
//! managed interpreter: it resolves which binary variant a build target
//! needs, caches it on disk with fetch-at-most-once semantics, optionally
//! shares it across targets through a memoized layer registry, and splices
//! the install step into the pipeline's lifecycle hooks without disturbing
//! caller-supplied hooks.
//!
//! # Modules
//!
//! - [`cache`] - On-disk binary cache with atomic population
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`layer`] - Shared-layer registry for cross-target reuse
//! - [`pipeline`] - Bundling configuration and hook composition
//! - [`provision`] - The drop-in build-target provisioning step
//! - [`variant`] - Binary variant resolution
//!
//! # Example
//!
//! ```
//! use skiff::variant::{resolve, Architecture, BinarySource, FeatureSet, VersionSpec};
//!
//! let source = BinarySource::default();
//! let variant = resolve(&source, &VersionSpec::Latest, Architecture::Arm64, FeatureSet::Standard);
//! assert_eq!(variant.identifier, "llrt-lambda-arm64");
//! ```
//!
//! For the full provisioning flow over a build backend, see the
//! integration tests.

pub mod cache;
pub mod cli;
pub mod error;
pub mod layer;
pub mod pipeline;
pub mod provision;
pub mod variant;

pub use error::{Result, SkiffError};
