//! Error types for ledger-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ledger-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed column letters or cell address
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Access outside the grid's declared rectangle
    #[error("Cell ({row}, {col}) out of bounds (grid is {rows} x {cols})")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// Grid exchange format (de)serialization failure
    #[error("Grid JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
