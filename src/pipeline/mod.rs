//! Bundling pipeline composition.
//!
//! This module assembles the declarative bundling configuration handed to
//! the external build pipeline: the ECMAScript target, output format,
//! external-module exclusions for the selected SDK feature set, and the
//! three-stage lifecycle hook chain that splices the runtime binary into
//! the build output.

pub mod compose;
pub mod exclude;
pub mod hooks;

pub use compose::{compose, BundlingConfig, BundlingOverrides, OutputFormat};
pub use exclude::external_modules;
pub use hooks::{HookChain, HookStage, HookStep};
