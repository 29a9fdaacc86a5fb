//! Error types for the scene core.
//!
//! Resource-load failures are handled where they happen — loaders log and
//! hand back a degraded default — so these errors live at the boundary and
//! never cross into per-frame code.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Shader compilation or linking failed.
    #[error("shader error: {0}")]
    Shader(String),

    /// A model, texture or material could not be loaded.
    #[error("resource error: {0}")]
    Resource(String),

    /// Underlying IO failure while reading an asset.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
