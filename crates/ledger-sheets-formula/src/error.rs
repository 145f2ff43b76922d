//! Formula error types

use ledger_sheets_core::CellError;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Formula evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Circular reference
    #[error("Circular reference detected")]
    CircularReference,

    /// Reference to an invalid or unresolvable cell
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl FormulaError {
    /// Map to the short error code recorded on the failing cell
    pub fn cell_error(&self) -> CellError {
        match self {
            FormulaError::Parse(_) | FormulaError::UnknownFunction(_) => CellError::Name,
            _ => CellError::Unresolved,
        }
    }
}
