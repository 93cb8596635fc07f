//! Error types for message rendering.

use std::io;
use std::path::PathBuf;

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Rendering error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced attachment path could not be read in full.
    #[error("attachment unreadable: {path}: {source}")]
    Attachment {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
