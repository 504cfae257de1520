//! Job files
//!
//! A job file describes one export in YAML or JSON:
//!
//! ```yaml
//! output_name: report.xlsx
//! options:
//!   template_path: template.xlsx
//!   output_folder: out
//!   sheet_name: Sheet1
//!   start_cell: A6
//!   end_cell: H6
//!   header_mappings:
//!     - { cell: B2, field: Rig }
//! header:
//!   Rig: AL 101HSA
//! records:
//!   - { Op: Drilling, Depth: 201.8 }
//! ```
//!
//! Relative `template_path` and `output_folder` are resolved against the
//! directory holding the job file.

use crate::error::ExportResult;
use crate::export::TemplateExporter;
use crate::types::ExportJob;
use std::path::{Path, PathBuf};
use tracing::debug;

impl ExportJob {
    /// Load a job file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let mut job = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        if let Some(base) = path.parent() {
            job.resolve_relative_to(base);
        }
        debug!(job = %path.display(), records = job.records.len(), "job loaded");

        Ok(job)
    }

    pub fn from_yaml_str(content: &str) -> ExportResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Anchor relative template and output paths at `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        self.options.template_path = anchor(base, &self.options.template_path);
        self.options.output_folder = anchor(base, &self.options.output_folder);
    }

    /// Run the export this job describes.
    pub fn run(&self) -> ExportResult<PathBuf> {
        TemplateExporter::new(self.options.clone()).export(
            &self.output_name,
            &self.header,
            &self.records,
        )
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
