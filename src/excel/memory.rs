//! In-memory workbook

use super::session::{CellKind, RawCell, SessionError, WorkbookSession};
use crate::address::{column_number, CellRef};
use crate::types::CellValue;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Workbook held entirely in memory. Saving only counts the call.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    sheets: HashMap<String, BTreeMap<(u32, u32, String), CellValue>>,
    protected: HashSet<(String, CellRef)>,
    saves: usize,
    fail_saves: bool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with one empty sheet named `sheet`.
    pub fn with_sheet(sheet: &str) -> Self {
        let mut session = Self::new();
        session.add_sheet(sheet);
        session
    }

    pub fn add_sheet(&mut self, sheet: &str) {
        self.sheets.entry(sheet.to_string()).or_default();
    }

    /// Store a value directly, creating the sheet when missing.
    pub fn set(&mut self, sheet: &str, cell: &CellRef, value: impl Into<CellValue>) {
        self.sheets
            .entry(sheet.to_string())
            .or_default()
            .insert(Self::key(cell), value.into());
    }

    pub fn get(&self, sheet: &str, cell: &CellRef) -> Option<&CellValue> {
        self.sheets.get(sheet)?.get(&Self::key(cell))
    }

    /// Make writes to `cell` fail, the way a locked cell would.
    pub fn protect(&mut self, sheet: &str, cell: &CellRef) {
        self.protected.insert((sheet.to_string(), cell.clone()));
    }

    /// Make every later [`WorkbookSession::save`] fail.
    pub fn fail_saves(&mut self) {
        self.fail_saves = true;
    }

    /// Number of times [`WorkbookSession::save`] was called.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Stored cells of `sheet` in row-major order.
    pub fn cells(&self, sheet: &str) -> Vec<(CellRef, &CellValue)> {
        self.sheets
            .get(sheet)
            .map(|cells| {
                cells
                    .iter()
                    .map(|((row, _, column), value)| (CellRef::new(column.clone(), *row), value))
                    .collect()
            })
            .unwrap_or_default()
    }

    // Row first so iteration runs top to bottom, then left to right.
    fn key(cell: &CellRef) -> (u32, u32, String) {
        let column = column_number(&cell.column).unwrap_or(0);
        (cell.row, column, cell.column.clone())
    }
}

impl WorkbookSession for MemorySession {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    fn read_cell(&self, sheet: &str, cell: &CellRef) -> Result<RawCell, SessionError> {
        let cells = self
            .sheets
            .get(sheet)
            .ok_or_else(|| SessionError::SheetNotFound(sheet.to_string()))?;

        let raw = match cells.get(&Self::key(cell)) {
            None | Some(CellValue::Empty) => RawCell::blank(),
            Some(CellValue::Bool(b)) => {
                RawCell::new(if *b { "TRUE" } else { "FALSE" }, CellKind::Bool)
            }
            Some(v @ CellValue::Number(_)) => RawCell::new(v.to_string(), CellKind::Number),
            Some(v @ CellValue::Date(_)) => RawCell::new(v.to_string(), CellKind::Date),
            Some(CellValue::Text(s)) => RawCell::new(s.clone(), CellKind::Text),
        };
        Ok(raw)
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        cell: &CellRef,
        value: &CellValue,
    ) -> Result<(), SessionError> {
        if self.protected.contains(&(sheet.to_string(), cell.clone())) {
            return Err(SessionError::Protected(cell.to_string()));
        }

        let cells = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| SessionError::SheetNotFound(sheet.to_string()))?;
        cells.insert(Self::key(cell), value.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<(), SessionError> {
        if self.fail_saves {
            return Err(SessionError::Engine("save refused".to_string()));
        }
        self.saves += 1;
        Ok(())
    }
}
