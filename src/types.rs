use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Sheet used when the options leave `sheet_name` unset.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

//==============================================================================
// Cell Values
//==============================================================================

/// A single value read from or written to a cell.
///
/// Job files carry plain scalars, so the serde form is untagged: `null` is
/// `Empty`, `true` is `Bool`, `1.5` is `Number`, an ISO timestamp such as
/// `"2022-09-20T00:00:00"` is `Date`, and any other string is `Text`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::Bool(_) => "Boolean",
            CellValue::Number(_) => "Number",
            CellValue::Date(_) => "Date",
            CellValue::Text(_) => "Text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

/// One unit of data: field name → value.
pub type Record = HashMap<String, CellValue>;

/// Build a [`Record`] from `(field, value)` pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

//==============================================================================
// Export Options
//==============================================================================

/// Where a named header value is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMapping {
    pub cell: String,
    pub field: String,
}

impl CellMapping {
    pub fn new(cell: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub template_path: PathBuf,
    pub sheet_name: Option<String>,
    pub output_folder: PathBuf,
    pub header_mappings: Vec<CellMapping>,
    /// First cell of the attribute-name line.
    pub start_cell: String,
    /// Boundary cell of the attribute-name line; not itself read.
    pub end_cell: String,
}

impl ExportOptions {
    /// The sheet to edit, falling back to [`DEFAULT_SHEET_NAME`].
    pub fn sheet(&self) -> &str {
        match self.sheet_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_SHEET_NAME,
        }
    }
}

/// Everything one export needs. Built by the caller and consumed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub output_name: String,
    #[serde(default)]
    pub options: ExportOptions,
    #[serde(default)]
    pub header: Record,
    #[serde(default)]
    pub records: Vec<Record>,
}
