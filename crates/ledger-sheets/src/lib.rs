//! # ledger-sheets
//!
//! The spreadsheet data/formula engine behind an equity-research assistant:
//! a grid data model with snapshot edits, a self-contained formula parser and
//! evaluator, and a deterministic generator that synthesizes a multi-year DCF
//! model as a grid of literals and formulas.
//!
//! The core is pure and in-memory. Fetching historical financials, sourcing
//! assumptions (LLM tool calls or manual forms), and persisting grids are the
//! host application's job; grids cross that boundary as a 2-D JSON array of
//! `{format, value, className?}` cells.
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets::prelude::*;
//!
//! // Build a tiny sheet and evaluate it
//! let mut grid = Grid::from_rows(vec![vec![
//!     Cell::number(25448.0),
//!     Cell::number(-11694.0),
//!     Cell::formula(CellFormat::Percentage, "=-B1/A1"),
//! ]]);
//! Evaluator::new(&mut grid).evaluate_all();
//!
//! let margin = grid.get(0, 2).unwrap();
//! assert!((margin.cached_result().unwrap() - 0.4596).abs() < 1e-3);
//! assert_eq!(margin.display(), "46.0%");
//! ```

pub mod prelude;
pub mod surface;

pub use surface::{Direction, EditSource, SheetSurface};

// Re-export core types
pub use ledger_sheets_core::{
    Cell, CellError, CellFormat, CellValue, Coord, Error, EvalState, Grid, Result, MAX_COLS,
    MAX_ROWS,
};

// Re-export formula types
pub use ledger_sheets_formula::{
    parse_formula, BinaryOperator, Evaluator, Expr, FormulaError, FormulaResult, UnaryOperator,
};

// Re-export DCF types
pub use ledger_sheets_dcf::{
    generate, Assumption, DcfAssumptions, FiscalYearData, HistoricalData, ModelSpan,
};
