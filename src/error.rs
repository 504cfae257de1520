use std::path::PathBuf;

use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Error reading output folder {}: {reason}", .path.display())]
    OutputFolderInvalid { path: PathBuf, reason: String },

    #[error("Error reading template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy template to destination: {source}")]
    Copy {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open spreadsheet session for {}: {reason}", .path.display())]
    SessionOpen { path: PathBuf, reason: String },

    #[error("Failed to write header cell {cell}: {reason}")]
    HeaderWrite { cell: String, reason: String },

    #[error("Invalid attribute range {start}:{end}")]
    InvalidAttributeRange { start: String, end: String },

    #[error("Failed to write record {record_index}: {reason}")]
    DataWrite { record_index: usize, reason: String },

    #[error("Failed to save {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Short tag naming the failed phase, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::InvalidCoordinate(_) => "InvalidCoordinate",
            ExportError::OutputFolderInvalid { .. } => "OutputFolderInvalid",
            ExportError::TemplateRead { .. } => "TemplateReadError",
            ExportError::OutputWrite { .. } => "OutputWriteError",
            ExportError::Copy { .. } => "CopyError",
            ExportError::SessionOpen { .. } => "SessionOpenError",
            ExportError::HeaderWrite { .. } => "HeaderWriteError",
            ExportError::InvalidAttributeRange { .. } => "InvalidAttributeRange",
            ExportError::DataWrite { .. } => "DataWriteError",
            ExportError::Save { .. } => "SaveError",
            ExportError::Io(_) => "Io",
            ExportError::Yaml(_) => "Yaml",
            ExportError::Json(_) => "Json",
        }
    }
}
