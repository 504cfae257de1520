//! Sheetstamp - fill spreadsheet templates from records
//!
//! A template workbook is copied, header values are written into mapped
//! cells, and data records are laid out line by line next to a line of
//! attribute names that acts as their schema.
//!
//! # Features
//!
//! - A1-style address algebra (`B2`, `AA14`, `Z` → `AA` carries)
//! - Horizontal or vertical attribute lines, records on perpendicular lines
//! - Typed values (Text, Number, Boolean, Date, Empty)
//! - YAML/JSON job files
//!
//! # Example
//!
//! ```no_run
//! use sheetstamp::types::{record, CellMapping, ExportOptions};
//! use sheetstamp::export::export;
//!
//! let options = ExportOptions {
//!     template_path: "template.xlsx".into(),
//!     output_folder: "out".into(),
//!     header_mappings: vec![CellMapping::new("B2", "Rig")],
//!     start_cell: "A6".to_string(),
//!     end_cell: "H6".to_string(),
//!     ..Default::default()
//! };
//! let header = record([("Rig", "AL 101HSA")]);
//! let rows = vec![record([("Op", "Drilling")])];
//!
//! let written = export("report.xlsx", &options, &header, &rows)?;
//! println!("Wrote {}", written.display());
//! # Ok::<(), sheetstamp::error::ExportError>(())
//! ```

pub mod address;
pub mod cli;
pub mod error;
pub mod excel;
pub mod export;
pub mod job;
pub mod types;

// Re-export commonly used types
pub use address::{CellRef, Direction};
pub use error::{ExportError, ExportResult};
pub use export::{export, TemplateExporter};
pub use types::{CellMapping, CellValue, ExportJob, ExportOptions, Record};
