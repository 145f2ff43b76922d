//! The grid: a 2-D snapshot container of cells

use crate::cell::{Cell, CellFormat, CellValue};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn empty_cell() -> &'static Cell {
    static EMPTY: OnceLock<Cell> = OnceLock::new();
    EMPTY.get_or_init(Cell::empty)
}

/// A 2-D ordered container of cells, rows outer
///
/// Rows may be ragged; the column count is the longest row's length, and a
/// coordinate inside the bounding rectangle but past a row's populated length
/// reads as an empty Text cell. Edits never mutate in place: `with_*` methods
/// return a fresh snapshot, and the owning application holds the single
/// current grid.
///
/// On the wire a grid is a 2-D JSON array of `{format, value, className?}`
/// objects (the exchange format used by the DCF template and tool-generated
/// sheets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Create a rectangular grid of empty Text cells
    pub fn new(rows: u32, cols: u32) -> Self {
        let row = vec![Cell::empty(); cols as usize];
        Self {
            rows: vec![row; rows as usize],
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of columns (longest row)
    pub fn col_count(&self) -> u32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<()> {
        if row >= self.row_count() || col >= self.col_count() {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            });
        }
        Ok(())
    }

    /// Get the cell at (row, col)
    ///
    /// Coordinates inside the bounding rectangle but past a row's populated
    /// length yield an empty Text cell; coordinates outside the rectangle fail
    /// with [`Error::OutOfBounds`].
    pub fn get(&self, row: u32, col: u32) -> Result<&Cell> {
        self.check_bounds(row, col)?;
        Ok(self
            .rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or_else(|| empty_cell()))
    }

    /// Get a mutable reference to a stored cell, if one exists at (row, col)
    ///
    /// Implicit empty cells (inside the rectangle but not materialized) return
    /// `None`; they carry no evaluation state to update.
    pub fn get_stored_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        self.rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
    }

    /// Iterate over all stored cells with their coordinates
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (r as u32, c as u32, cell))
        })
    }

    /// Return a new grid with the cell at (row, col) updated from raw input
    ///
    /// Coercion policy: if the target cell's format is numeric (Number or
    /// Percentage) and the input is not a formula, a successful float parse
    /// stores the number and a failed parse stores the raw text (a format
    /// mismatch is not an error here; it surfaces later as a display or
    /// evaluation problem). All evaluation caches in the new snapshot are
    /// invalidated.
    pub fn with_cell_updated(&self, row: u32, col: u32, raw: &str) -> Result<Grid> {
        let format = self.get(row, col)?.format();
        let numeric = matches!(format, CellFormat::Number | CellFormat::Percentage);

        let value = if numeric && !raw.starts_with('=') {
            match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(raw.to_string()),
            }
        } else {
            CellValue::Text(raw.to_string())
        };

        let mut grid = self.clone();
        grid.materialize(row, col);
        if let Some(cell) = grid.get_stored_mut(row, col) {
            cell.set_value(value);
        }
        grid.invalidate_all();
        Ok(grid)
    }

    /// Return a new grid with the cell at (row, col) cleared
    pub fn with_cell_cleared(&self, row: u32, col: u32) -> Result<Grid> {
        self.check_bounds(row, col)?;

        let mut grid = self.clone();
        grid.materialize(row, col);
        if let Some(cell) = grid.get_stored_mut(row, col) {
            cell.set_value(CellValue::Text(String::new()));
        }
        grid.invalidate_all();
        Ok(grid)
    }

    /// Reset every cell's evaluation cache and error
    pub fn invalidate_all(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                cell.invalidate();
            }
        }
    }

    /// Extend the target row with empty cells so (row, col) is stored
    fn materialize(&mut self, row: u32, col: u32) {
        if let Some(r) = self.rows.get_mut(row as usize) {
            while r.len() <= col as usize {
                r.push(Cell::empty());
            }
        }
    }

    /// Serialize to the JSON exchange format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from the JSON exchange format
    ///
    /// All cells in the result start unevaluated.
    pub fn from_json(json: &str) -> Result<Grid> {
        Ok(serde_json::from_str(json)?)
    }
}
