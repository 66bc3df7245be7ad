//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`VernissageError`] covers all failure modes including:
//! - Asset loading and decoding errors
//! - HTTP and network errors
//! - Scene-patching pipeline misuse
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, VernissageError>`.
//!
//! ```rust,ignore
//! use vernissage::errors::{VernissageError, Result};
//!
//! fn load_asset() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the vernissage runtime.
///
/// Programmer-misuse variants (`ProcessorNotCommitted`, `MaterialKind`) fail
/// fast and loud. Asset-load failures are aggregated into `LoadFailed` and
/// surfaced once through the loader's failure event.
#[derive(Error, Debug)]
pub enum VernissageError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A URL had no extension the loader knows how to dispatch.
    #[error("Cannot load artefact, unknown extension `{extension}` in {url}")]
    UnknownExtension {
        /// The offending URL
        url: String,
        /// The extension that had no registered loader path
        extension: String,
    },

    /// One or more asset fetches failed; the bundle is permanently failed.
    #[error("Resource bundle failed to load: {}", errors.join("; "))]
    LoadFailed {
        /// Human-readable message per failed URL
        errors: Vec<String>,
    },

    /// The bundle was requested before loading completed.
    #[error("bundle is not loaded")]
    BundleNotLoaded,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    HttpResponseError {
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Image & Format Errors
    // ========================================================================
    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Scene Patching Errors
    // ========================================================================
    /// A processor's output was read before its commit step ran.
    #[error("Cannot give output of `{0}` because commit() was not called")]
    ProcessorNotCommitted(&'static str),

    /// A node carried a material kind the processor hard-requires not to see.
    #[error("Node `{node}` must carry a {expected} material, found {found}")]
    MaterialKind {
        /// Name of the offending node
        node: String,
        /// The material kinds the processor accepts
        expected: &'static str,
        /// The material kind actually present
        found: &'static str,
    },
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for VernissageError {
    fn from(err: image::ImageError) -> Self {
        VernissageError::ImageDecodeError(err.to_string())
    }
}

impl From<gltf::Error> for VernissageError {
    fn from(err: gltf::Error) -> Self {
        VernissageError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, VernissageError>`.
pub type Result<T> = std::result::Result<T, VernissageError>;
