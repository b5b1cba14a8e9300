//! Error types for braess-vis.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for diagram export.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting a diagram.
#[derive(Debug, Error)]
pub enum Error {
    /// The output file extension does not name a known format.
    #[error("unsupported diagram format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
