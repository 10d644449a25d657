//! sheetcodec CLI - minimal XLSX preview and results export
//!
//! A command-line tool for previewing spreadsheet rows and writing results
//! workbooks.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetcodec::render::JsonFormat;
use sheetcodec::{ExportOptions, ExportRow, PackageParts};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Default file name for exported results.
const DEFAULT_EXPORT_NAME: &str = "results.xlsx";

/// Minimal XLSX preview and results export
#[derive(Parser)]
#[command(
    name = "sheetcodec",
    author = "iyulab",
    version,
    about = "Preview XLSX rows and export results workbooks",
    long_about = "sheetcodec - minimal XLSX codec.\n\n\
                  Reads the first sheet of an XLSX workbook as text rows and writes\n\
                  single-sheet results workbooks from JSON records."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sheets and first-sheet rows of a workbook
    Preview {
        /// Input file path
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON (no indentation; requires --format json)
        #[arg(long)]
        compact: bool,

        /// Maximum number of rows to print (text format)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a results workbook from a JSON array of {no, name, timestamp}
    Export {
        /// JSON input file path
        input: PathBuf,

        /// Output file path (".xlsx" is appended when missing)
        #[arg(short, long)]
        output: Option<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document creator
        #[arg(long)]
        creator: Option<String>,
    },

    /// List the parts of a package
    Parts {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Preview output format
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Tab-separated rows
    Text,
    /// JSON payload
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Preview {
            input,
            format,
            compact,
            limit,
            output,
        } => {
            let layout = json_format(&format, compact)?;

            let pb = create_spinner("Reading workbook...");
            let preview = sheetcodec::decode_workbook_file(&input)?;
            pb.finish_and_clear();

            let rendered = match layout {
                Some(layout) => sheetcodec::render::to_json(&preview, layout)?,
                None => {
                    let mut text = String::new();
                    text.push_str(&format!("# sheets: {}\n", preview.sheet_names.join(", ")));
                    text.push_str(&format!("# active: {}\n", preview.active_sheet));
                    text.push_str(&sheetcodec::render::to_text(&preview, limit));
                    text
                }
            };

            write_output(output.as_ref(), &rendered)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} rows from {}: {}",
                    "✓".green().bold(),
                    preview.rows.len(),
                    preview.active_sheet,
                    path.display()
                );
            }
        }

        Commands::Export {
            input,
            output,
            title,
            creator,
        } => {
            let json = fs::read_to_string(&input)?;
            let rows: Vec<ExportRow> = serde_json::from_str(&json)?;

            let mut options = ExportOptions::new();
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if let Some(creator) = creator {
                options = options.with_creator(creator);
            }

            let path = PathBuf::from(export_file_name(output.as_deref()));
            let pb = create_spinner("Writing workbook...");
            sheetcodec::save_results_workbook(&path, &rows, &options)?;
            pb.finish_and_clear();

            println!(
                "{} Exported {} rows: {}",
                "✓".green().bold(),
                rows.len(),
                path.display()
            );
        }

        Commands::Parts { input } => {
            let parts = PackageParts::open(&input)?;

            println!("{}", "Package Parts".cyan().bold());
            println!("{}", "─".repeat(40));
            for (path, content) in &parts {
                println!("{:>10}  {}", content.len(), path);
            }
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Parts".bold(), parts.len());
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// JSON layout for a preview, or `None` for text output.
///
/// `--compact` only shapes JSON, so pairing it with text output is rejected.
fn json_format(format: &OutputFormat, compact: bool) -> Result<Option<JsonFormat>, String> {
    match (format, compact) {
        (OutputFormat::Json, true) => Ok(Some(JsonFormat::Compact)),
        (OutputFormat::Json, false) => Ok(Some(JsonFormat::Pretty)),
        (OutputFormat::Text, true) => Err("--compact requires --format json".to_string()),
        (OutputFormat::Text, false) => Ok(None),
    }
}

/// Output file name for an export: the default when none is given, with
/// ".xlsx" appended when the name lacks it (case-insensitive).
fn export_file_name(requested: Option<&str>) -> String {
    let name = requested
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME);

    if name.to_ascii_lowercase().ends_with(".xlsx") {
        name.to_string()
    } else {
        format!("{}.xlsx", name)
    }
}

fn print_version() {
    println!("{} {}", "sheetcodec".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Minimal XLSX preview and results export");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
