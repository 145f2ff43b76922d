//! Formula evaluator
//!
//! Demand-driven, recursive evaluation over a [`Grid`]. Resolving a formula
//! cell forces evaluation of the cells it references; results are memoized in
//! each cell's evaluation cache within a pass. A set of "currently evaluating"
//! coordinates guards against cycles, which resolve to `#ERROR!` instead of
//! recursing unboundedly.
//!
//! Error policy: failures are contained per cell. A range member that cannot
//! be resolved is silently skipped during aggregation, but a single-cell
//! operand that cannot be resolved fails the referencing formula. This
//! asymmetry is deliberate and load-bearing.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::functions::{self, ArgValue};
use crate::parser::parse_formula;
use ahash::AHashSet;
use ledger_sheets_core::{CellError, Coord, EvalState, Grid};

/// Outcome of resolving one cell to a numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolved {
    /// A numeric value
    Number(f64),
    /// Evaluated, but no numeric result (text or empty cell)
    Blank,
    /// The cell errored or cannot be resolved
    Fail,
}

/// Evaluates formula cells in a grid
///
/// Owns its bookkeeping for a single evaluation pass; create a fresh one per
/// grid snapshot.
///
/// # Example
/// ```rust
/// use ledger_sheets_core::{Cell, CellFormat, Grid};
/// use ledger_sheets_formula::Evaluator;
///
/// let mut grid = Grid::from_rows(vec![vec![
///     Cell::number(5.0),
///     Cell::formula(CellFormat::Number, "=A1*2"),
/// ]]);
/// let mut evaluator = Evaluator::new(&mut grid);
/// assert_eq!(evaluator.evaluate(0, 1), Some(10.0));
/// ```
pub struct Evaluator<'g> {
    grid: &'g mut Grid,
    in_progress: AHashSet<(u32, u32)>,
}

impl<'g> Evaluator<'g> {
    /// Create an evaluator over the given grid
    pub fn new(grid: &'g mut Grid) -> Self {
        Self {
            grid,
            in_progress: AHashSet::new(),
        }
    }

    /// Evaluate the cell at (row, col), returning its numeric result
    ///
    /// Populates the evaluation cache and error state on the cell and,
    /// transitively, on every cell it references. Returns `None` when the
    /// cell has no numeric result (text cells, errored formulas,
    /// out-of-bounds coordinates).
    pub fn evaluate(&mut self, row: u32, col: u32) -> Option<f64> {
        match self.resolve_cell(row, col) {
            Resolved::Number(n) => Some(n),
            Resolved::Blank | Resolved::Fail => None,
        }
    }

    /// Invalidate every cache and evaluate every formula cell
    ///
    /// The full-recompute policy: correctness over incrementality. One bad
    /// formula never aborts the pass; its error is recorded on the cell and
    /// evaluation continues.
    pub fn evaluate_all(&mut self) {
        self.grid.invalidate_all();

        let formula_cells: Vec<(u32, u32)> = self
            .grid
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_formula())
            .map(|(r, c, _)| (r, c))
            .collect();

        for (row, col) in formula_cells {
            self.resolve_cell(row, col);
        }
    }

    /// Resolve a cell to a numeric value, evaluating it on demand
    fn resolve_cell(&mut self, row: u32, col: u32) -> Resolved {
        let Ok(cell) = self.grid.get(row, col) else {
            // Reference outside the grid rectangle
            return Resolved::Fail;
        };

        if cell.error().is_some() {
            return Resolved::Fail;
        }
        match cell.eval_state() {
            EvalState::Evaluated(Some(n)) => return Resolved::Number(n),
            EvalState::Evaluated(None) => return Resolved::Blank,
            EvalState::NotEvaluated => {}
        }

        let source = cell.formula_source().map(str::to_string);
        let literal = cell.literal_number();

        let Some(source) = source else {
            return match literal {
                Some(n) => Resolved::Number(n),
                None => Resolved::Blank,
            };
        };

        // Re-entry means this cell's formula (transitively) references itself
        if !self.in_progress.insert((row, col)) {
            self.mark(row, col, Err(CellError::Unresolved));
            return Resolved::Fail;
        }

        let outcome = parse_formula(&source)
            .map_err(|e| e.cell_error())
            .and_then(|ast| self.eval_expr(&ast));

        self.in_progress.remove(&(row, col));
        self.mark(row, col, outcome);

        match outcome {
            Ok(n) => Resolved::Number(n),
            Err(_) => Resolved::Fail,
        }
    }

    fn mark(&mut self, row: u32, col: u32, outcome: Result<f64, CellError>) {
        if let Some(cell) = self.grid.get_stored_mut(row, col) {
            match outcome {
                Ok(n) => cell.cache_result(Some(n)),
                Err(e) => cell.mark_error(e),
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<f64, CellError> {
        match expr {
            Expr::Number(n) => Ok(*n),

            Expr::CellRef(coord) => match self.resolve_cell(coord.row, coord.col) {
                Resolved::Number(n) => Ok(n),
                // A single reference with no numeric value fails the formula
                Resolved::Blank | Resolved::Fail => Err(CellError::Unresolved),
            },

            // A bare range is only meaningful inside an aggregate
            Expr::RangeRef(_, _) => Err(CellError::Unresolved),

            Expr::UnaryOp { op, operand } => {
                let value = self.eval_expr(operand)?;
                match op {
                    UnaryOperator::Negate => Ok(-value),
                }
            }

            Expr::BinaryOp { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                match op {
                    BinaryOperator::Add => Ok(l + r),
                    BinaryOperator::Subtract => Ok(l - r),
                    BinaryOperator::Multiply => Ok(l * r),
                    BinaryOperator::Divide => {
                        if r == 0.0 {
                            Err(CellError::Unresolved)
                        } else {
                            Ok(l / r)
                        }
                    }
                    BinaryOperator::Power => Ok(l.powf(r)),
                }
            }

            Expr::Function { name, args } => {
                let mut resolved = Vec::with_capacity(args.len());
                for arg in args {
                    match arg {
                        Expr::RangeRef(start, end) => {
                            resolved.push(ArgValue::Range(self.resolve_range(*start, *end)));
                        }
                        other => resolved.push(ArgValue::Scalar(self.eval_expr(other)?)),
                    }
                }
                functions::call(name, &resolved).map_err(|e| e.cell_error())
            }
        }
    }

    /// Resolve a rectangular range to its numeric members
    ///
    /// Members that are blank, errored, or outside the grid are skipped
    /// rather than failing the aggregation.
    fn resolve_range(&mut self, start: Coord, end: Coord) -> Vec<f64> {
        let (row_lo, row_hi) = (start.row.min(end.row), start.row.max(end.row));
        let (col_lo, col_hi) = (start.col.min(end.col), start.col.max(end.col));

        let mut values = Vec::new();
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                if let Resolved::Number(n) = self.resolve_cell(row, col) {
                    values.push(n);
                }
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_sheets_core::{Cell, CellFormat};
    use pretty_assertions::assert_eq;

    fn grid_1xn(cells: Vec<Cell>) -> Grid {
        Grid::from_rows(vec![cells])
    }

    #[test]
    fn test_literal_formula() {
        let mut grid = grid_1xn(vec![Cell::formula(CellFormat::Number, "=5+5")]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 0), Some(10.0));
        assert_eq!(grid.get(0, 0).unwrap().error(), None);
        assert_eq!(grid.get(0, 0).unwrap().cached_result(), Some(10.0));
    }

    #[test]
    fn test_reference_chain_memoized() {
        let mut grid = grid_1xn(vec![
            Cell::number(2.0),
            Cell::formula(CellFormat::Number, "=A1*3"),
            Cell::formula(CellFormat::Number, "=B1+1"),
        ]);
        let mut ev = Evaluator::new(&mut grid);

        // Evaluating C1 forces B1 first
        assert_eq!(ev.evaluate(0, 2), Some(7.0));
        assert_eq!(
            grid.get(0, 1).unwrap().eval_state(),
            EvalState::Evaluated(Some(6.0))
        );
    }

    #[test]
    fn test_text_reference_fails_arithmetic() {
        let mut grid = grid_1xn(vec![
            Cell::text("hello"),
            Cell::formula(CellFormat::Number, "=A1+1"),
        ]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 1), None);
        assert_eq!(grid.get(0, 1).unwrap().error(), Some(CellError::Unresolved));
        // The text cell itself carries no error
        assert_eq!(grid.get(0, 0).unwrap().error(), None);
    }

    #[test]
    fn test_range_skips_holes_single_ref_does_not() {
        let mut grid = Grid::from_rows(vec![
            vec![Cell::number(1.0)],
            vec![Cell::text("n/a")],
            vec![Cell::number(3.0)],
            vec![Cell::formula(CellFormat::Number, "=SUM(A1:A3)")],
            vec![Cell::formula(CellFormat::Number, "=A2")],
        ]);
        let mut ev = Evaluator::new(&mut grid);

        // The text member is silently skipped in the range aggregation
        assert_eq!(ev.evaluate(3, 0), Some(4.0));

        // But fails when referenced as a single operand
        assert_eq!(ev.evaluate(4, 0), None);
        assert_eq!(grid.get(4, 0).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_error_containment() {
        let mut rows: Vec<Vec<Cell>> = (1..=9).map(|n| vec![Cell::number(n as f64)]).collect();
        rows.push(vec![Cell::formula(CellFormat::Number, "=1/0")]);
        let mut grid = Grid::from_rows(rows);

        let mut ev = Evaluator::new(&mut grid);
        ev.evaluate_all();

        for row in 0..9 {
            assert_eq!(grid.get(row, 0).unwrap().error(), None);
            assert_eq!(
                grid.get(row, 0).unwrap().literal_number(),
                Some((row + 1) as f64)
            );
        }
        assert_eq!(grid.get(9, 0).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_cycle_detection() {
        let mut grid = grid_1xn(vec![
            Cell::formula(CellFormat::Number, "=B1"),
            Cell::formula(CellFormat::Number, "=A1"),
        ]);
        let mut ev = Evaluator::new(&mut grid);

        assert_eq!(ev.evaluate(0, 0), None);
        assert_eq!(grid.get(0, 0).unwrap().error(), Some(CellError::Unresolved));
        assert_eq!(grid.get(0, 1).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_self_reference() {
        let mut grid = grid_1xn(vec![Cell::formula(CellFormat::Number, "=A1+1")]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 0), None);
        assert_eq!(grid.get(0, 0).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_parse_failure_marks_name_error() {
        let mut grid = grid_1xn(vec![
            Cell::formula(CellFormat::Number, "=NOPE(1)"),
            Cell::formula(CellFormat::Number, "=1+"),
        ]);
        let mut ev = Evaluator::new(&mut grid);
        ev.evaluate_all();

        assert_eq!(grid.get(0, 0).unwrap().error(), Some(CellError::Name));
        assert_eq!(grid.get(0, 1).unwrap().error(), Some(CellError::Name));
    }

    #[test]
    fn test_reference_to_errored_cell_fails() {
        let mut grid = grid_1xn(vec![
            Cell::formula(CellFormat::Number, "=1/0"),
            Cell::formula(CellFormat::Number, "=A1*2"),
        ]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 1), None);
        assert_eq!(grid.get(0, 1).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_out_of_bounds_reference_fails() {
        let mut grid = grid_1xn(vec![Cell::formula(CellFormat::Number, "=Z99")]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 0), None);
        assert_eq!(grid.get(0, 0).unwrap().error(), Some(CellError::Unresolved));
    }

    #[test]
    fn test_percentage_literal_resolves_as_fraction() {
        let mut grid = grid_1xn(vec![
            Cell::percentage(0.08),
            Cell::number(100.0),
            Cell::formula(CellFormat::Number, "=B1*(1+A1)"),
        ]);
        let mut ev = Evaluator::new(&mut grid);
        assert_eq!(ev.evaluate(0, 2), Some(108.0));
    }

    #[test]
    fn test_evaluate_all_leaves_literals_alone() {
        let mut grid = grid_1xn(vec![Cell::number(1.5), Cell::text("note")]);
        let mut ev = Evaluator::new(&mut grid);
        ev.evaluate_all();
        assert_eq!(grid.get(0, 0).unwrap().literal_number(), Some(1.5));
        assert_eq!(grid.get(0, 1).unwrap().error(), None);
    }
}
