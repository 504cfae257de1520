//! Typed reads along a line of cells, and record writes along one

use super::session::{CellKind, RawCell, SessionError, WorkbookSession};
use crate::address::{next_cell, steps_between, CellRef, Direction};
use crate::error::{ExportError, ExportResult};
use crate::types::{CellValue, Record};
use tracing::{debug, warn};

/// Convert a raw cell into a value according to its declared type.
///
/// - Bool   → `true` iff the text is `true` (any case)
/// - Number → parsed float, `0` when the text does not parse
/// - Date   → raw text, no date parsing
/// - other  → raw text
pub fn coerce(raw: &RawCell) -> CellValue {
    match raw.kind {
        CellKind::Bool => CellValue::Bool(raw.text.eq_ignore_ascii_case("true")),
        CellKind::Number => CellValue::Number(raw.text.trim().parse().unwrap_or(0.0)),
        CellKind::Date | CellKind::Text | CellKind::Other => CellValue::Text(raw.text.clone()),
    }
}

/// Read the cells from `start` up to, but not including, `end`.
///
/// A cell that cannot be read yields an empty string rather than failing the
/// whole line. An `end` that `direction` never reaches from `start` is an
/// [`ExportError::InvalidAttributeRange`].
pub fn read_line<S>(
    session: &S,
    sheet: &str,
    start: &CellRef,
    end: &CellRef,
    direction: Direction,
) -> ExportResult<Vec<CellValue>>
where
    S: WorkbookSession + ?Sized,
{
    let steps = steps_between(start, end, direction).ok_or_else(|| {
        ExportError::InvalidAttributeRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    })?;

    let mut values = Vec::with_capacity(steps);
    let mut current = start.clone();
    for _ in 0..steps {
        let value = match session.read_cell(sheet, &current) {
            Ok(raw) => coerce(&raw),
            Err(e) => {
                warn!(cell = %current, error = %e, "cell read failed, using empty text");
                CellValue::Text(String::new())
            }
        };
        debug!(cell = %current, value = %value, "read");
        values.push(value);
        current = next_cell(&current, direction);
    }

    Ok(values)
}

/// Write one record's fields in `names` order, starting at `start` and stepping in `direction`.
///
/// Fields the record does not carry are written as [`CellValue::Empty`];
/// fields not named in `names` are skipped.
pub fn write_line<S>(
    session: &mut S,
    sheet: &str,
    names: &[String],
    start: &CellRef,
    direction: Direction,
    record: &Record,
) -> Result<(), SessionError>
where
    S: WorkbookSession + ?Sized,
{
    let mut current = start.clone();
    for name in names {
        let value = record.get(name).unwrap_or(&CellValue::Empty);
        session.write_cell(sheet, &current, value)?;
        current = next_cell(&current, direction);
    }
    Ok(())
}
