//! # ledger-sheets-core
//!
//! Core data structures for the ledger-sheets spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout ledger-sheets:
//! - [`Coord`] - Cell coordinates and the bijective base-26 A1 address codec
//! - [`Cell`] - One grid position: format, source value, evaluation cache, error, style tag
//! - [`Grid`] - The 2-D snapshot container of cells, with the JSON exchange format
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets_core::{Cell, CellFormat, Grid};
//!
//! let grid = Grid::from_rows(vec![vec![
//!     Cell::number(25448.0),
//!     Cell::formula(CellFormat::Number, "=A1*2"),
//! ]]);
//!
//! // Edits produce a fresh snapshot
//! let edited = grid.with_cell_updated(0, 0, "26000").unwrap();
//! assert_eq!(edited.get(0, 0).unwrap().literal_number(), Some(26000.0));
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use cell::{Cell, CellError, CellFormat, CellValue, EvalState};
pub use coord::Coord;
pub use error::{Error, Result};
pub use grid::Grid;

/// Maximum number of rows in a grid
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a grid
pub const MAX_COLS: u32 = 16_384;
