//! Interactive sheet surface
//!
//! The state-transition contract between a UI and the grid core: a cursor, an
//! edit buffer, and a single commit path. The surface owns the one current
//! [`Grid`] snapshot; every commit applies the update rule, re-evaluates the
//! new snapshot, and swaps it in. UI event plumbing (focus, key decoding,
//! rendering) lives in the host application, not here.

use ledger_sheets_core::{Cell, CellValue, Grid, Result};
use ledger_sheets_formula::Evaluator;

/// Cursor movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which editing surface opened the buffer
///
/// Both surfaces write through the same commit path; the stored value is
/// identical regardless of where the edit happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    /// In-cell editing
    Cell,
    /// The separate formula bar
    FormulaBar,
}

#[derive(Debug, Clone)]
struct EditBuffer {
    source: EditSource,
    text: String,
}

/// An editable view over a grid
///
/// # Example
/// ```rust
/// use ledger_sheets::{Cell, CellFormat, Grid, SheetSurface, EditSource};
///
/// let grid = Grid::from_rows(vec![vec![
///     Cell::number(10.0),
///     Cell::formula(CellFormat::Number, "=A1*2"),
/// ]]);
/// let mut surface = SheetSurface::new(grid);
///
/// surface.select(0, 0).unwrap();
/// surface.begin_edit(EditSource::FormulaBar);
/// surface.replace_buffer("25");
/// surface.commit().unwrap();
///
/// assert_eq!(surface.grid().get(0, 1).unwrap().cached_result(), Some(50.0));
/// ```
pub struct SheetSurface {
    grid: Grid,
    cursor: (u32, u32),
    edit: Option<EditBuffer>,
}

impl SheetSurface {
    /// Create a surface over a grid, evaluating it once up front
    pub fn new(mut grid: Grid) -> Self {
        Evaluator::new(&mut grid).evaluate_all();
        Self {
            grid,
            cursor: (0, 0),
            edit: None,
        }
    }

    /// The current grid snapshot
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The selected coordinate
    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    /// The cell under the cursor
    pub fn selected_cell(&self) -> Result<&Cell> {
        self.grid.get(self.cursor.0, self.cursor.1)
    }

    /// Move the cursor to (row, col)
    ///
    /// Fails with `OutOfBounds` outside the grid rectangle. Any in-progress
    /// edit is discarded; committing is an explicit action.
    pub fn select(&mut self, row: u32, col: u32) -> Result<()> {
        self.grid.get(row, col)?;
        self.cursor = (row, col);
        self.edit = None;
        Ok(())
    }

    /// Open an edit buffer seeded from the selected cell's source value
    pub fn begin_edit(&mut self, source: EditSource) {
        let text = self
            .selected_cell()
            .map(|cell| source_text(cell))
            .unwrap_or_default();
        self.edit = Some(EditBuffer { source, text });
    }

    /// The surface that opened the current edit, if one is open
    pub fn edit_source(&self) -> Option<EditSource> {
        self.edit.as_ref().map(|e| e.source)
    }

    /// The current edit buffer contents, if an edit is open
    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(|e| e.text.as_str())
    }

    /// Replace the edit buffer contents
    pub fn replace_buffer<S: Into<String>>(&mut self, text: S) {
        if let Some(edit) = &mut self.edit {
            edit.text = text.into();
        }
    }

    /// Append typed characters to the edit buffer
    pub fn push_str(&mut self, s: &str) {
        if let Some(edit) = &mut self.edit {
            edit.text.push_str(s);
        }
    }

    /// Remove the last character from the edit buffer (backspace)
    pub fn pop_char(&mut self) {
        if let Some(edit) = &mut self.edit {
            edit.text.pop();
        }
    }

    /// Discard the edit buffer without touching the grid
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Commit the open edit to the selected cell
    ///
    /// Applies the update rule, re-evaluates the new snapshot, swaps it in,
    /// and moves the cursor down one row (enter-moves-down). A commit with no
    /// open edit is a no-op.
    pub fn commit(&mut self) -> Result<()> {
        let Some(edit) = self.edit.take() else {
            return Ok(());
        };
        let (row, col) = self.cursor;
        self.commit_input(row, col, &edit.text)?;
        self.move_cursor(Direction::Down);
        Ok(())
    }

    /// Write raw input to a cell and re-evaluate
    ///
    /// The single write path shared by in-cell editing, the formula bar, and
    /// programmatic edits.
    pub fn commit_input(&mut self, row: u32, col: u32, raw: &str) -> Result<()> {
        let mut updated = self.grid.with_cell_updated(row, col, raw)?;
        Evaluator::new(&mut updated).evaluate_all();
        self.grid = updated;
        Ok(())
    }

    /// Clear the selected cell and re-evaluate
    pub fn delete_selected(&mut self) -> Result<()> {
        let (row, col) = self.cursor;
        let mut updated = self.grid.with_cell_cleared(row, col)?;
        Evaluator::new(&mut updated).evaluate_all();
        self.grid = updated;
        self.edit = None;
        Ok(())
    }

    /// Move the cursor one step, clamping at the grid edges
    ///
    /// Discards any in-progress edit.
    pub fn move_cursor(&mut self, direction: Direction) {
        let (row, col) = self.cursor;
        let max_row = self.grid.row_count().saturating_sub(1);
        let max_col = self.grid.col_count().saturating_sub(1);

        self.cursor = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(max_row), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(max_col)),
        };
        self.edit = None;
    }

    /// Advance one column, wrapping to the start of the next row
    ///
    /// From the last cell of the grid the cursor wraps to the top-left.
    pub fn tab_next(&mut self) {
        let (row, col) = self.cursor;
        let max_row = self.grid.row_count().saturating_sub(1);
        let max_col = self.grid.col_count().saturating_sub(1);

        self.cursor = if col < max_col {
            (row, col + 1)
        } else if row < max_row {
            (row + 1, 0)
        } else {
            (0, 0)
        };
        self.edit = None;
    }
}

/// The text an edit buffer starts from: the cell's raw source, not its
/// rendered display
fn source_text(cell: &Cell) -> String {
    match cell.value() {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format!("{}", n),
    }
}
