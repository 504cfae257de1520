//! Template exporter implementation

use super::geometry::Geometry;
use crate::address::{next_cell, CellRef};
use crate::error::{ExportError, ExportResult};
use crate::excel::{read_line, write_line, SessionError, UmyaSession, WorkbookSession};
use crate::types::{CellMapping, CellValue, ExportOptions, Record};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copy `options.template_path` into `options.output_folder/output_name` and fill it.
///
/// Returns the path of the written workbook.
pub fn export(
    output_name: &str,
    options: &ExportOptions,
    header: &Record,
    records: &[Record],
) -> ExportResult<PathBuf> {
    TemplateExporter::new(options.clone()).export(output_name, header, records)
}

/// Fills copies of one template.
///
/// Every call to [`TemplateExporter::export`] makes its own copy and opens its
/// own session; nothing is shared between calls.
pub struct TemplateExporter {
    options: ExportOptions,
}

impl TemplateExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export through the .xlsx engine.
    pub fn export(
        &self,
        output_name: &str,
        header: &Record,
        records: &[Record],
    ) -> ExportResult<PathBuf> {
        self.export_with(output_name, header, records, UmyaSession::open)
    }

    /// Export through any engine; `open` turns the copied file into a session.
    ///
    /// Validate → Copy → Open → WriteHeaders → ReadAttributes → WriteRecords → Save.
    /// The first failure ends the export. Cells written before it stay in the
    /// copied file.
    pub fn export_with<S, F>(
        &self,
        output_name: &str,
        header: &Record,
        records: &[Record],
        open: F,
    ) -> ExportResult<PathBuf>
    where
        S: WorkbookSession,
        F: FnOnce(&Path) -> Result<S, SessionError>,
    {
        let destination = self.copy_template(output_name)?;
        info!(output = %destination.display(), "template copied");

        let mut session = open(&destination).map_err(|e| ExportError::SessionOpen {
            path: destination.clone(),
            reason: e.to_string(),
        })?;

        let sheet = self.options.sheet();
        if !session.has_sheet(sheet) {
            return Err(ExportError::SessionOpen {
                path: destination,
                reason: SessionError::SheetNotFound(sheet.to_string()).to_string(),
            });
        }

        self.fill(&mut session, header, records)?;

        session.save().map_err(|e| ExportError::Save {
            path: destination.clone(),
            reason: e.to_string(),
        })?;
        info!(
            output = %destination.display(),
            records = records.len(),
            "export saved"
        );

        Ok(destination)
    }

    /// Write headers and records into an already open session. Does not save.
    pub fn fill<S>(&self, session: &mut S, header: &Record, records: &[Record]) -> ExportResult<()>
    where
        S: WorkbookSession + ?Sized,
    {
        let sheet = self.options.sheet();
        let start: CellRef = self.options.start_cell.parse()?;
        let end: CellRef = self.options.end_cell.parse()?;

        write_header(session, sheet, &self.options.header_mappings, header)?;

        let geometry = Geometry::of(&start, &end);
        let names = read_attribute_names(session, sheet, &start, &end, geometry)?;
        debug!(?geometry, attributes = ?names, "attribute names read");

        // First record goes on the line after the names so they stay in place.
        let mut line_start = next_cell(&start, geometry.record_step());
        for (record_index, record) in records.iter().enumerate() {
            debug!(record_index, cell = %line_start, "writing record");
            write_line(
                session,
                sheet,
                &names,
                &line_start,
                geometry.field_step(),
                record,
            )
            .map_err(|e| ExportError::DataWrite {
                record_index,
                reason: e.to_string(),
            })?;
            line_start = next_cell(&line_start, geometry.record_step());
        }

        Ok(())
    }

    fn copy_template(&self, output_name: &str) -> ExportResult<PathBuf> {
        let folder = &self.options.output_folder;
        match fs::metadata(folder) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ExportError::OutputFolderInvalid {
                    path: folder.clone(),
                    reason: "is not a directory".to_string(),
                })
            }
            Err(e) => {
                return Err(ExportError::OutputFolderInvalid {
                    path: folder.clone(),
                    reason: e.to_string(),
                })
            }
        }

        let template = &self.options.template_path;
        let destination = folder.join(output_name);

        let mut source = File::open(template).map_err(|source| ExportError::TemplateRead {
            path: template.clone(),
            source,
        })?;

        // Creating the destination truncates it, so it must not be the template itself.
        if let (Ok(a), Ok(b)) = (fs::canonicalize(template), fs::canonicalize(&destination)) {
            if a == b {
                return Err(ExportError::OutputWrite {
                    path: destination,
                    source: io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "output would overwrite the template",
                    ),
                });
            }
        }

        let mut dest = File::create(&destination).map_err(|source| ExportError::OutputWrite {
            path: destination.clone(),
            source,
        })?;

        io::copy(&mut source, &mut dest).map_err(|source| ExportError::Copy { source })?;

        Ok(destination)
    }
}

fn write_header<S>(
    session: &mut S,
    sheet: &str,
    mappings: &[CellMapping],
    header: &Record,
) -> ExportResult<()>
where
    S: WorkbookSession + ?Sized,
{
    for mapping in mappings {
        let header_error = |reason: String| ExportError::HeaderWrite {
            cell: mapping.cell.clone(),
            reason,
        };

        let cell: CellRef = mapping
            .cell
            .parse()
            .map_err(|e: ExportError| header_error(e.to_string()))?;
        let value = header.get(&mapping.field).unwrap_or(&CellValue::Empty);

        session
            .write_cell(sheet, &cell, value)
            .map_err(|e| header_error(e.to_string()))?;
        debug!(cell = %cell, field = %mapping.field, "header written");
    }
    Ok(())
}

fn read_attribute_names<S>(
    session: &S,
    sheet: &str,
    start: &CellRef,
    end: &CellRef,
    geometry: Geometry,
) -> ExportResult<Vec<String>>
where
    S: WorkbookSession + ?Sized,
{
    let values = read_line(session, sheet, start, end, geometry.field_step())?;
    if values.is_empty() {
        return Err(ExportError::InvalidAttributeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(values.iter().map(CellValue::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::MemorySession;
    use crate::types::record;
    use tempfile::TempDir;

    fn cell(s: &str) -> CellRef {
        s.parse().unwrap()
    }

    fn horizontal_options() -> ExportOptions {
        ExportOptions {
            start_cell: "A6".to_string(),
            end_cell: "D6".to_string(),
            header_mappings: vec![CellMapping::new("B2", "Rig")],
            ..Default::default()
        }
    }

    fn horizontal_session() -> MemorySession {
        let mut session = MemorySession::with_sheet("Sheet1");
        session.set("Sheet1", &cell("A6"), "Time");
        session.set("Sheet1", &cell("B6"), "Op");
        session.set("Sheet1", &cell("C6"), "Depth");
        session
    }

    #[test]
    fn test_fill_horizontal_writes_rows_below_names() {
        let exporter = TemplateExporter::new(horizontal_options());
        let mut session = horizontal_session();
        let header = record([("Rig", "AL 101HSA")]);
        let records = vec![
            record([("Time", CellValue::from(1.0)), ("Op", "Drilling".into())]),
            record([("Op", CellValue::from("Tripping")), ("Depth", 202.75.into())]),
        ];

        exporter.fill(&mut session, &header, &records).unwrap();

        assert_eq!(
            session.get("Sheet1", &cell("B2")),
            Some(&CellValue::from("AL 101HSA"))
        );
        // names untouched
        assert_eq!(session.get("Sheet1", &cell("A6")), Some(&CellValue::from("Time")));
        assert_eq!(session.get("Sheet1", &cell("A7")), Some(&CellValue::Number(1.0)));
        assert_eq!(
            session.get("Sheet1", &cell("B7")),
            Some(&CellValue::from("Drilling"))
        );
        assert_eq!(session.get("Sheet1", &cell("C7")), Some(&CellValue::Empty));
        assert_eq!(session.get("Sheet1", &cell("A8")), Some(&CellValue::Empty));
        assert_eq!(
            session.get("Sheet1", &cell("C8")),
            Some(&CellValue::Number(202.75))
        );
        assert!(session.get("Sheet1", &cell("D7")).is_none());
        assert_eq!(session.saves(), 0);
    }

    #[test]
    fn test_fill_vertical_writes_columns_right_of_names() {
        let options = ExportOptions {
            start_cell: "B3".to_string(),
            end_cell: "B5".to_string(),
            ..Default::default()
        };
        let mut session = MemorySession::with_sheet("Sheet1");
        session.set("Sheet1", &cell("B3"), "Well");
        session.set("Sheet1", &cell("B4"), "Depth");

        let records = vec![
            record([("Well", CellValue::from("AL 101")), ("Depth", 10.0.into())]),
            record([("Well", CellValue::from("AL 102")), ("Depth", 20.0.into())]),
        ];
        TemplateExporter::new(options)
            .fill(&mut session, &Record::new(), &records)
            .unwrap();

        assert_eq!(session.get("Sheet1", &cell("C3")), Some(&CellValue::from("AL 101")));
        assert_eq!(session.get("Sheet1", &cell("C4")), Some(&CellValue::Number(10.0)));
        assert_eq!(session.get("Sheet1", &cell("D3")), Some(&CellValue::from("AL 102")));
        assert_eq!(session.get("Sheet1", &cell("D4")), Some(&CellValue::Number(20.0)));
    }

    #[test]
    fn test_header_for_unknown_field_is_empty() {
        let exporter = TemplateExporter::new(horizontal_options());
        let mut session = horizontal_session();

        exporter.fill(&mut session, &Record::new(), &[]).unwrap();
        assert_eq!(session.get("Sheet1", &cell("B2")), Some(&CellValue::Empty));
    }

    #[test]
    fn test_header_with_bad_cell_fails() {
        let mut options = horizontal_options();
        options.header_mappings = vec![CellMapping::new("2B", "Rig")];
        let mut session = horizontal_session();

        let err = TemplateExporter::new(options)
            .fill(&mut session, &Record::new(), &[])
            .unwrap_err();
        match err {
            ExportError::HeaderWrite { cell, .. } => assert_eq!(cell, "2B"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_attribute_range() {
        let mut options = horizontal_options();
        options.end_cell = "A6".to_string();
        let mut session = horizontal_session();

        let err = TemplateExporter::new(options)
            .fill(&mut session, &Record::new(), &[])
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidAttributeRange { .. }));
    }

    #[test]
    fn test_data_write_failure_reports_record_index() {
        let exporter = TemplateExporter::new(horizontal_options());
        let mut session = horizontal_session();
        session.protect("Sheet1", &cell("B8"));

        let records = vec![Record::new(), Record::new(), Record::new()];
        let err = exporter
            .fill(&mut session, &Record::new(), &records)
            .unwrap_err();
        match err {
            ExportError::DataWrite { record_index, .. } => assert_eq!(record_index, 1),
            other => panic!("unexpected error: {other}"),
        }
        // first record stays written
        assert_eq!(session.get("Sheet1", &cell("A7")), Some(&CellValue::Empty));
    }

    #[test]
    fn test_export_with_missing_folder_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let options = ExportOptions {
            output_folder: missing.clone(),
            ..horizontal_options()
        };

        let err = TemplateExporter::new(options)
            .export_with("out.xlsx", &Record::new(), &[], |_| {
                Ok(MemorySession::with_sheet("Sheet1"))
            })
            .unwrap_err();
        assert!(matches!(err, ExportError::OutputFolderInvalid { .. }));
        assert!(!missing.join("out.xlsx").exists());
    }

    #[test]
    fn test_export_with_file_as_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let options = ExportOptions {
            output_folder: file,
            ..horizontal_options()
        };

        let err = export("out.xlsx", &options, &Record::new(), &[]).unwrap_err();
        assert_eq!(err.kind(), "OutputFolderInvalid");
    }

    #[test]
    fn test_export_with_missing_template() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions {
            template_path: dir.path().join("missing.xlsx"),
            output_folder: dir.path().to_path_buf(),
            ..horizontal_options()
        };

        let err = export("out.xlsx", &options, &Record::new(), &[]).unwrap_err();
        assert!(matches!(err, ExportError::TemplateRead { .. }));
    }

    #[test]
    fn test_export_refuses_to_overwrite_template() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        std::fs::write(&template, b"not really xlsx").unwrap();
        let options = ExportOptions {
            template_path: template.clone(),
            output_folder: dir.path().to_path_buf(),
            ..horizontal_options()
        };

        let err = export("template.xlsx", &options, &Record::new(), &[]).unwrap_err();
        assert!(matches!(err, ExportError::OutputWrite { .. }));
        assert_eq!(std::fs::read(&template).unwrap(), b"not really xlsx");
    }

    #[test]
    fn test_export_with_unreadable_workbook() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        std::fs::write(&template, b"not really xlsx").unwrap();
        let options = ExportOptions {
            template_path: template,
            output_folder: dir.path().to_path_buf(),
            ..horizontal_options()
        };

        let err = export("out.xlsx", &options, &Record::new(), &[]).unwrap_err();
        assert!(matches!(err, ExportError::SessionOpen { .. }));
        // the copy stays behind
        assert!(dir.path().join("out.xlsx").exists());
    }

    #[test]
    fn test_export_with_memory_engine_saves_once() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        std::fs::write(&template, b"bytes").unwrap();
        let options = ExportOptions {
            template_path: template,
            output_folder: dir.path().to_path_buf(),
            ..horizontal_options()
        };

        let path = TemplateExporter::new(options)
            .export_with("copy.xlsx", &Record::new(), &[], |_| {
                Ok(horizontal_session())
            })
            .unwrap();
        assert_eq!(path, dir.path().join("copy.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn test_export_with_missing_sheet() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        std::fs::write(&template, b"bytes").unwrap();
        let options = ExportOptions {
            template_path: template,
            output_folder: dir.path().to_path_buf(),
            sheet_name: Some("Report".to_string()),
            ..horizontal_options()
        };

        let err = TemplateExporter::new(options)
            .export_with("copy.xlsx", &Record::new(), &[], |_| {
                Ok(horizontal_session())
            })
            .unwrap_err();
        assert!(matches!(err, ExportError::SessionOpen { .. }));
    }

    #[test]
    fn test_export_with_failed_save_keeps_copy() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        std::fs::write(&template, b"bytes").unwrap();
        let options = ExportOptions {
            template_path: template,
            output_folder: dir.path().to_path_buf(),
            ..horizontal_options()
        };
        let records = vec![record([("Op", CellValue::from("Drilling"))])];

        let err = TemplateExporter::new(options)
            .export_with("copy.xlsx", &Record::new(), &records, |_| {
                let mut session = horizontal_session();
                session.fail_saves();
                Ok(session)
            })
            .unwrap_err();

        assert_eq!(err.kind(), "SaveError");
        match err {
            ExportError::Save { path, reason } => {
                assert_eq!(path, dir.path().join("copy.xlsx"));
                assert!(reason.contains("save refused"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read(dir.path().join("copy.xlsx")).unwrap(), b"bytes");
    }
}
