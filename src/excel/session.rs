//! Engine seam for reading and writing cells of an open workbook

use crate::address::CellRef;
use crate::types::CellValue;
use thiserror::Error;

/// Declared type of a stored cell, as the engine reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Bool,
    Number,
    Date,
    Text,
    /// Blank cells, errors, and anything else the engine stores.
    Other,
}

/// A cell's raw text together with its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub kind: CellKind,
}

impl RawCell {
    pub fn new(text: impl Into<String>, kind: CellKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn blank() -> Self {
        Self::new(String::new(), CellKind::Other)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("cell {0} is not writable")]
    Protected(String),

    #[error("{0}")]
    Engine(String),
}

/// An open, editable workbook.
///
/// A session belongs to a single export. Closing happens on drop; unsaved
/// changes are discarded.
pub trait WorkbookSession {
    fn has_sheet(&self, sheet: &str) -> bool;

    /// Read a cell. Cells that were never written read as [`RawCell::blank`].
    fn read_cell(&self, sheet: &str, cell: &CellRef) -> Result<RawCell, SessionError>;

    fn write_cell(
        &mut self,
        sheet: &str,
        cell: &CellRef,
        value: &CellValue,
    ) -> Result<(), SessionError>;

    /// Persist all writes to the file the session was opened from.
    fn save(&mut self) -> Result<(), SessionError>;
}
