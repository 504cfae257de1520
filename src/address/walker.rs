//! Stepping between neighbouring cells

use super::codec::{parse, CellRef};
use super::column::{column_number, increment_column};
use crate::error::ExportResult;

/// Axis a line of cells advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Same column, row number increases (stepping down).
    RowWise,
    /// Same row, column letters increase (stepping right).
    ColumnWise,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::RowWise => Direction::ColumnWise,
            Direction::ColumnWise => Direction::RowWise,
        }
    }
}

/// The neighbouring cell in `direction`.
pub fn next_cell(cell: &CellRef, direction: Direction) -> CellRef {
    match direction {
        Direction::RowWise => CellRef::new(cell.column.clone(), cell.row.saturating_add(1)),
        Direction::ColumnWise => CellRef::new(increment_column(&cell.column), cell.row),
    }
}

/// [`next_cell`] on coordinate strings.
pub fn next_coordinate(coordinate: &str, direction: Direction) -> ExportResult<String> {
    let cell = parse(coordinate)?;
    Ok(next_cell(&cell, direction).to_string())
}

/// Number of steps in `direction` that lead from `start` to `end`,
/// or `None` when `end` is never reached.
pub fn steps_between(start: &CellRef, end: &CellRef, direction: Direction) -> Option<usize> {
    match direction {
        Direction::RowWise => {
            if start.column != end.column || end.row < start.row {
                return None;
            }
            Some((end.row - start.row) as usize)
        }
        Direction::ColumnWise => {
            if start.row != end.row {
                return None;
            }
            let from = column_number(&start.column)?;
            let to = column_number(&end.column)?;
            to.checked_sub(from).map(|n| n as usize)
        }
    }
}
