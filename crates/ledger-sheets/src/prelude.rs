//! Prelude module - common imports for ledger-sheets users
//!
//! ```rust
//! use ledger_sheets::prelude::*;
//! ```

pub use crate::{
    generate,
    Assumption,
    // Cell types
    Cell,
    CellError,
    CellFormat,
    CellValue,
    Coord,
    // DCF types
    DcfAssumptions,
    // Surface types
    Direction,
    EditSource,
    // Error types
    Error,
    EvalState,
    // Formula types
    Evaluator,
    FiscalYearData,
    FormulaError,
    FormulaResult,
    // Main types
    Grid,
    HistoricalData,
    ModelSpan,
    Result,
    SheetSurface,
};
