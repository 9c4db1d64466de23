//! Error types for mpdforge-manifest.
//!
//! Attribute decoding itself is total; these cover reading descriptor
//! lists from outside the process.

use std::io;
use thiserror::Error;

/// Result type for mpdforge-manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for mpdforge-manifest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The descriptor document is not valid JSON or has the wrong shape.
    #[error("Invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),
}
