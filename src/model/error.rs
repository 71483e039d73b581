//! Error types for the simulation core.

use thiserror::Error;

/// Main error type for sandpile operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// Grid setup was given a zero-sized dimension.
    #[error("invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    /// The engine was used before a successful setup.
    #[error("sandpile is not set up; call setup() first")]
    NotInitialized,

    /// A session seed drop targets a cell outside the grid.
    #[error("seed drop at ({x}, {y}) lies outside the {width}x{height} grid")]
    DropOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// Result type alias for sandpile operations.
pub type Result<T> = std::result::Result<T, ModelError>;
