//! Error types for Skiff operations.
//!
//! This module defines [`SkiffError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SkiffError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SkiffError::Other`) for unexpected errors,
//!   including anything surfaced by the consumer's build backend
//! - Every error is fatal at this crate's boundary: provisioning happens at
//!   build-definition time and nothing is retried internally

use thiserror::Error;

/// Core error type for Skiff operations.
#[derive(Debug, Error)]
pub enum SkiffError {
    /// The requested runtime variant cannot be resolved.
    ///
    /// Currently unreachable: every selector has a defined default. The
    /// variant is kept so callers matching on error kinds stay source
    /// compatible if a future binary family constrains its combinations.
    #[error("Cannot resolve runtime variant: {message}")]
    Resolution { message: String },

    /// The remote archive could not be retrieved, or was not a readable zip.
    #[error("Failed to fetch runtime archive from {url}: {message}")]
    Fetch { url: String, message: String },

    /// The archive was readable but did not contain the expected payload.
    #[error("Runtime archive from {archive} is missing expected payload: {message}")]
    Extraction { archive: String, message: String },

    /// Caller-supplied bundling overrides cannot be composed.
    #[error("Invalid bundling overrides: {message}")]
    PipelineComposition { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Skiff operations.
pub type Result<T> = std::result::Result<T, SkiffError>;
