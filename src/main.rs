use clap::{Parser, Subcommand};
use sheetstamp::cli::{self, FillOverrides};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetstamp")]
#[command(about = "Fill spreadsheet templates with a header record and tabular data.")]
#[command(long_about = "Sheetstamp - spreadsheet template filler

Copies an .xlsx template, writes header values into mapped cells, and lays
data records out next to a line of attribute names.

COMMANDS:
  fill        - Run an export described by a YAML/JSON job file
  attributes  - Show the attribute names a range resolves to
  next        - Print the cell after a coordinate

EXAMPLES:
  sheetstamp fill job.yaml
  sheetstamp fill job.yaml --output-name week42.xlsx --output-folder out/
  sheetstamp attributes template.xlsx --start A6 --end H6
  sheetstamp next AZ7 --column-wise")]
#[command(version)]
struct Cli {
    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the export described by a job file.

The job file (YAML, or JSON when it ends in .json) names the template, the
output folder and file name, the sheet, the header cell mappings, the
attribute-name range, the header record and the data records.

Relative paths in the job file are resolved against the job file's folder.
The output folder must already exist.

EXAMPLE:
  sheetstamp fill job.yaml --output-name report.xlsx")]
    /// Fill a template from a job file
    Fill {
        /// Path to the job file
        job: PathBuf,

        /// Output file name (overrides the job file)
        #[arg(long)]
        output_name: Option<String>,

        /// Output folder (overrides the job file)
        #[arg(long)]
        output_folder: Option<PathBuf>,

        /// Sheet to fill (overrides the job file)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Show the attribute names an attribute range resolves to
    Attributes {
        /// Path to the .xlsx file
        file: PathBuf,

        /// First cell of the attribute-name line
        #[arg(long)]
        start: String,

        /// Boundary cell of the line (not read)
        #[arg(long)]
        end: String,

        /// Sheet name (default: Sheet1)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Print the cell after a coordinate
    Next {
        /// Coordinate such as B2 or AZ14
        coordinate: String,

        /// Step down to the next row (default)
        #[arg(long, conflicts_with = "column_wise")]
        row_wise: bool,

        /// Step right to the next column
        #[arg(long)]
        column_wise: bool,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "sheetstamp=debug"
    } else {
        "sheetstamp=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fill {
            job,
            output_name,
            output_folder,
            sheet,
        } => cli::fill(
            job,
            FillOverrides {
                output_name,
                output_folder,
                sheet,
            },
            cli.verbose,
        )?,

        Commands::Attributes {
            file,
            start,
            end,
            sheet,
        } => cli::attributes(file, start, end, sheet)?,

        Commands::Next {
            coordinate,
            column_wise,
            ..
        } => cli::next(coordinate, column_wise)?,
    }

    Ok(())
}
