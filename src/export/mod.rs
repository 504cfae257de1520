//! Template export
//!
//! Copies a template workbook, writes the header cells, then lays the data
//! records out next to the attribute-name line.

mod exporter;
mod geometry;

pub use exporter::{export, TemplateExporter};
pub use geometry::Geometry;
