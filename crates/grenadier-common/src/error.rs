//! Error types for Grenadier.

use thiserror::Error;

/// Top-level error type for Grenadier operations.
#[derive(Debug, Error)]
pub enum GrenadierError {
    /// Tile map errors
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tile map parsing errors.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    /// The map has no rows
    #[error("map is empty")]
    Empty,

    /// A row has a different width than the first row
    #[error("row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        /// Row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        actual: usize,
    },

    /// Unknown tile character
    #[error("unknown tile '{ch}' at row {row}, column {column}")]
    UnknownTile {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
        /// Offending character
        ch: char,
    },

    /// Tile size is not a positive finite number
    #[error("invalid tile size {0}")]
    InvalidTileSize(f64),
}

/// Result type alias for Grenadier operations.
pub type GrenadierResult<T> = Result<T, GrenadierError>;
