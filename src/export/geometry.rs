//! Attribute-line geometry and the directions it implies

use crate::address::{CellRef, Direction};

/// Shape of the attribute-name line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Start and end share a row: names run across columns.
    Horizontal,
    /// Anything else: names run down a column.
    Vertical,
}

impl Geometry {
    pub fn of(start: &CellRef, end: &CellRef) -> Self {
        if start.row == end.row {
            Geometry::Horizontal
        } else {
            Geometry::Vertical
        }
    }

    /// Direction of the attribute names and of the fields within one record.
    pub fn field_step(self) -> Direction {
        self.steps().0
    }

    /// Direction from one record's line to the next.
    pub fn record_step(self) -> Direction {
        self.steps().1
    }

    // (field step, record step); the two are always perpendicular.
    const fn steps(self) -> (Direction, Direction) {
        match self {
            Geometry::Horizontal => (Direction::ColumnWise, Direction::RowWise),
            Geometry::Vertical => (Direction::RowWise, Direction::ColumnWise),
        }
    }
}
