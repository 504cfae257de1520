//! .xlsx engine backed by umya-spreadsheet

use super::session::{CellKind, RawCell, SessionError, WorkbookSession};
use crate::address::{column_number, CellRef};
use crate::types::CellValue;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{reader, writer, Cell, Spreadsheet};

/// Number format applied to cells written from [`CellValue::Date`].
const DATE_FORMAT_CODE: &str = "yyyy-mm-dd hh:mm:ss";

/// Last column (`XFD`) and row of an .xlsx worksheet.
const MAX_COLUMN: u32 = 16_384;
const MAX_ROW: u32 = 1_048_576;

/// Editing session over a workbook file on disk.
pub struct UmyaSession {
    path: PathBuf,
    book: Spreadsheet,
}

impl UmyaSession {
    /// Open an existing .xlsx file for editing
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        let book = reader::xlsx::read(path)
            .map_err(|e| SessionError::Engine(format!("Failed to open Excel file: {}", e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            book,
        })
    }

    fn cell_kind(cell: &Cell) -> CellKind {
        match cell.get_data_type() {
            "b" => CellKind::Bool,
            "n" => {
                let is_date = cell
                    .get_style()
                    .get_number_format()
                    .map(|format| looks_like_date_format(format.get_format_code()))
                    .unwrap_or(false);
                if is_date {
                    CellKind::Date
                } else {
                    CellKind::Number
                }
            }
            "s" | "str" | "inlineStr" => CellKind::Text,
            _ => CellKind::Other,
        }
    }
}

impl WorkbookSession for UmyaSession {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.book.get_sheet_by_name(sheet).is_some()
    }

    fn read_cell(&self, sheet: &str, cell: &CellRef) -> Result<RawCell, SessionError> {
        let worksheet = self
            .book
            .get_sheet_by_name(sheet)
            .ok_or_else(|| SessionError::SheetNotFound(sheet.to_string()))?;

        let coordinate = within_sheet(cell)?;
        match worksheet.get_cell(coordinate.as_str()) {
            Some(stored) => Ok(RawCell::new(
                stored.get_value().to_string(),
                Self::cell_kind(stored),
            )),
            None => Ok(RawCell::blank()),
        }
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        cell: &CellRef,
        value: &CellValue,
    ) -> Result<(), SessionError> {
        let worksheet = self
            .book
            .get_sheet_by_name_mut(sheet)
            .ok_or_else(|| SessionError::SheetNotFound(sheet.to_string()))?;

        let coordinate = within_sheet(cell)?;
        let target = worksheet.get_cell_mut(coordinate.as_str());
        match value {
            CellValue::Empty => {
                target.set_value_string("");
            }
            CellValue::Bool(b) => {
                target.set_value_bool(*b);
            }
            CellValue::Number(n) => {
                target.set_value_number(*n);
            }
            CellValue::Text(s) => {
                target.set_value_string(s.as_str());
            }
            CellValue::Date(d) => match excel_serial(d) {
                Some(serial) => {
                    target.set_value_number(serial);
                    target
                        .get_style_mut()
                        .get_number_format_mut()
                        .set_format_code(DATE_FORMAT_CODE);
                }
                None => {
                    target.set_value_string(value.to_string());
                }
            },
        }

        Ok(())
    }

    fn save(&mut self) -> Result<(), SessionError> {
        writer::xlsx::write(&self.book, &self.path)
            .map_err(|e| SessionError::Engine(format!("Failed to save Excel file: {}", e)))
    }
}

/// Coordinate text for `cell`, or an error when it lies past the worksheet limits.
/// The engine panics on such coordinates instead of reporting them.
fn within_sheet(cell: &CellRef) -> Result<String, SessionError> {
    let column_fits = column_number(&cell.column).is_some_and(|n| n <= MAX_COLUMN);
    if !column_fits || cell.row > MAX_ROW {
        return Err(SessionError::Engine(format!("{} is outside the sheet", cell)));
    }
    Ok(cell.to_string())
}

/// Excel serial date (days since 1899-12-30, time as the fraction).
fn excel_serial(value: &NaiveDateTime) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = value.signed_duration_since(epoch).num_milliseconds();
    Some(millis as f64 / 86_400_000.0)
}

/// Whether a number format code renders a date or time.
///
/// Quoted literals, bracketed sections (`[Red]`, `[$-409]`) and escaped
/// characters are ignored before looking for date/time tokens.
pub fn looks_like_date_format(code: &str) -> bool {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '\\' => escaped = true,
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            _ if in_brackets => {}
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        assert!(looks_like_date_format("yyyy-mm-dd"));
        assert!(looks_like_date_format("m/d/yy h:mm"));
        assert!(looks_like_date_format("[$-409]d-mmm-yy"));
        assert!(looks_like_date_format("hh:mm:ss"));
    }

    #[test]
    fn test_number_formats() {
        assert!(!looks_like_date_format("General"));
        assert!(!looks_like_date_format("0.00"));
        assert!(!looks_like_date_format("#,##0.00;[Red]-#,##0.00"));
        assert!(!looks_like_date_format("0.0 \"days\""));
        assert!(!looks_like_date_format("@"));
        assert!(!looks_like_date_format("0\\h"));
    }

    #[test]
    fn test_within_sheet_limits() {
        assert_eq!(within_sheet(&CellRef::new("XFD", 1_048_576)).unwrap(), "XFD1048576");
        assert!(within_sheet(&CellRef::new("XFE", 1)).is_err());
        assert!(within_sheet(&CellRef::new("A", 1_048_577)).is_err());
        assert!(within_sheet(&CellRef::new("ZZZZZZZZ", 1)).is_err());
    }

    #[test]
    fn test_excel_serial() {
        let day = NaiveDate::from_ymd_opt(2022, 9, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(excel_serial(&day), Some(44824.0));

        let noon = day + chrono::Duration::hours(12);
        assert_eq!(excel_serial(&noon), Some(44824.5));
    }
}
