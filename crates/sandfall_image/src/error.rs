//! Error types for sandfall_image.

use thiserror::Error;

/// Main error type for image export operations.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The cell buffer does not cover the requested dimensions.
    #[error("cell buffer holds {len} cells, expected {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    /// Zero-sized images cannot be encoded.
    #[error("image dimensions {width}x{height} must both be positive")]
    EmptyImage { width: u32, height: u32 },

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sandfall_image operations.
pub type Result<T> = std::result::Result<T, ImageError>;
