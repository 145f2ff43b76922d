//! # ledger-sheets-formula
//!
//! Formula parser and evaluator for ledger-sheets.
//!
//! This crate provides:
//! - Formula parsing (text → AST) via a self-contained recursive descent parser
//! - Demand-driven, memoized evaluation over a grid with explicit cycle detection
//! - The small function library the DCF model relies on (SUM and friends)
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets_core::{Cell, CellFormat, Grid};
//! use ledger_sheets_formula::Evaluator;
//!
//! let mut grid = Grid::from_rows(vec![vec![
//!     Cell::number(10.0),
//!     Cell::formula(CellFormat::Number, "=A1*2"),
//! ]]);
//! let mut evaluator = Evaluator::new(&mut grid);
//! assert_eq!(evaluator.evaluate(0, 1), Some(20.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::Evaluator;
pub use parser::parse_formula;
