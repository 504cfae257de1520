use crate::address::{next_coordinate, CellRef, Direction};
use crate::error::{ExportError, ExportResult};
use crate::excel::{read_line, UmyaSession, WorkbookSession};
use crate::export::Geometry;
use crate::types::{CellValue, ExportJob, DEFAULT_SHEET_NAME};
use colored::Colorize;
use std::path::PathBuf;

/// Command-line values that take precedence over the job file.
#[derive(Debug, Default, Clone)]
pub struct FillOverrides {
    pub output_name: Option<String>,
    pub output_folder: Option<PathBuf>,
    pub sheet: Option<String>,
}

/// Execute the fill command
pub fn fill(job_file: PathBuf, overrides: FillOverrides, verbose: bool) -> ExportResult<()> {
    println!("{}", "📄 Sheetstamp - Template Fill".bold().green());
    println!("   Job: {}", job_file.display());

    let mut job = ExportJob::from_path(&job_file)?;
    if let Some(name) = overrides.output_name {
        job.output_name = name;
    }
    if let Some(folder) = overrides.output_folder {
        job.options.output_folder = folder;
    }
    if let Some(sheet) = overrides.sheet {
        job.options.sheet_name = Some(sheet);
    }

    if verbose {
        println!("   Template: {}", job.options.template_path.display());
        println!("   Sheet:    {}", job.options.sheet().bright_blue());
        println!(
            "   Attributes: {}:{}",
            job.options.start_cell, job.options.end_cell
        );
        println!(
            "   {} header cells, {} records",
            job.options.header_mappings.len(),
            job.records.len()
        );
    }
    println!();

    let written = job.run()?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", written.display());

    Ok(())
}

/// Execute the attributes command: list the attribute names a range resolves to
pub fn attributes(
    file: PathBuf,
    start: String,
    end: String,
    sheet: Option<String>,
) -> ExportResult<()> {
    let sheet = sheet.unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
    let start_cell: CellRef = start.parse()?;
    let end_cell: CellRef = end.parse()?;

    let session = UmyaSession::open(&file).map_err(|e| ExportError::SessionOpen {
        path: file.clone(),
        reason: e.to_string(),
    })?;
    if !session.has_sheet(&sheet) {
        return Err(ExportError::SessionOpen {
            path: file,
            reason: format!("sheet '{}' not found", sheet),
        });
    }

    let geometry = Geometry::of(&start_cell, &end_cell);
    let names = read_line(
        &session,
        &sheet,
        &start_cell,
        &end_cell,
        geometry.field_step(),
    )?;

    println!(
        "{} {}!{}:{} ({:?})",
        "🔍 Attributes".bold().green(),
        sheet,
        start_cell,
        end_cell,
        geometry
    );
    if names.is_empty() {
        println!("   {}", "(none)".yellow());
    }
    for (index, name) in names.iter().enumerate() {
        let shown = match name {
            CellValue::Text(s) if s.is_empty() => "(blank)".yellow().to_string(),
            other => other.to_string().cyan().to_string(),
        };
        println!(
            "   {:>3}. {} {}",
            index + 1,
            shown,
            format!("[{}]", name.type_name()).dimmed()
        );
    }

    Ok(())
}

/// Execute the next command: print the neighbouring cell
pub fn next(coordinate: String, column_wise: bool) -> ExportResult<()> {
    let direction = if column_wise {
        Direction::ColumnWise
    } else {
        Direction::RowWise
    };
    println!("{}", next_coordinate(&coordinate, direction)?);
    Ok(())
}
