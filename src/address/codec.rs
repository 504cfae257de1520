//! Coordinate parsing and formatting

use crate::error::{ExportError, ExportResult};
use std::fmt;
use std::str::FromStr;

/// A parsed cell coordinate such as `AB12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Uppercase column letters (`A`, `Z`, `AA`, ...)
    pub column: String,
    /// 1-based row number
    pub row: u32,
}

impl CellRef {
    pub fn new(column: impl Into<String>, row: u32) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

impl FromStr for CellRef {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Split a coordinate into its leading `A`–`Z` letters and the row number after them.
///
/// Examples:
/// - `B2` → (`B`, 2)
/// - `AA14` → (`AA`, 14)
pub fn parse(coordinate: &str) -> ExportResult<CellRef> {
    let split = coordinate
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(coordinate.len());
    let (column, row_text) = coordinate.split_at(split);

    if column.is_empty() {
        return Err(ExportError::InvalidCoordinate(format!(
            "'{}' has no column letters",
            coordinate
        )));
    }
    if row_text.is_empty() || !row_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExportError::InvalidCoordinate(format!(
            "'{}' has no valid row number",
            coordinate
        )));
    }

    let row: u32 = row_text.parse().map_err(|_| {
        ExportError::InvalidCoordinate(format!("'{}' row number is out of range", coordinate))
    })?;
    if row == 0 {
        return Err(ExportError::InvalidCoordinate(format!(
            "'{}' rows start at 1",
            coordinate
        )));
    }

    Ok(CellRef::new(column, row))
}

/// Join column letters and a row number, no separator.
pub fn format(column: &str, row: u32) -> String {
    format!("{}{}", column, row)
}
