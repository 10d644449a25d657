//! # sheetcodec
//!
//! Minimal XLSX codec.
//!
//! The reader extracts the rows of a workbook's first sheet as strings,
//! along with every sheet name, without a full spreadsheet library. The
//! writer produces a small single-sheet package from [`ExportRow`] records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetcodec::{decode_workbook, encode_results_workbook, ExportRow};
//!
//! // Read
//! let data = std::fs::read("input.xlsx")?;
//! let preview = decode_workbook(&data)?;
//! println!("Sheets: {:?}, active: {}", preview.sheet_names, preview.active_sheet);
//! for row in &preview.rows {
//!     println!("{}", row.join(" | "));
//! }
//!
//! // Write
//! let rows = vec![ExportRow::new(1, "Alice", "2024-01-01T00:00:00Z")];
//! std::fs::write("results.xlsx", encode_results_workbook(&rows)?)?;
//! # Ok::<(), sheetcodec::Error>(())
//! ```
//!
//! Only the first declared sheet is decoded; other sheets are listed by name.
//! Cell values are never converted: numbers and booleans come back in their
//! stored text form.

pub mod container;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::{PackageParts, Relationship, Relationships};
pub use error::{Error, Result};
pub use model::{ExportRow, Row, SheetDescriptor, WorkbookPreview};
pub use options::ExportOptions;

use std::path::Path;

/// Decode a workbook from archive bytes.
///
/// # Example
///
/// ```no_run
/// use sheetcodec::decode_workbook;
///
/// let data = std::fs::read("data.xlsx")?;
/// let preview = decode_workbook(&data)?;
/// println!("{} rows in {}", preview.rows.len(), preview.active_sheet);
/// # Ok::<(), sheetcodec::Error>(())
/// ```
pub fn decode_workbook(data: &[u8]) -> Result<WorkbookPreview> {
    xlsx::XlsxParser::from_bytes(data)?.parse()
}

/// Decode a workbook file.
pub fn decode_workbook_file(path: impl AsRef<Path>) -> Result<WorkbookPreview> {
    xlsx::XlsxParser::open(path)?.parse()
}

/// Encode export rows as a results workbook using default options.
///
/// # Example
///
/// ```
/// use sheetcodec::{decode_workbook, encode_results_workbook, ExportRow};
///
/// let bytes = encode_results_workbook(&[ExportRow::new(1, "Alice", "2024-01-01T00:00:00Z")])?;
/// let preview = decode_workbook(&bytes)?;
/// assert_eq!(preview.rows[1], vec!["1", "Alice", "2024-01-01T00:00:00Z"]);
/// # Ok::<(), sheetcodec::Error>(())
/// ```
pub fn encode_results_workbook(rows: &[ExportRow]) -> Result<Vec<u8>> {
    encode_results_workbook_with_options(rows, &ExportOptions::default())
}

/// Encode export rows as a results workbook.
pub fn encode_results_workbook_with_options(
    rows: &[ExportRow],
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    xlsx::encode(rows, options)
}

/// Encode export rows and write the workbook to `path`.
///
/// The file is only created once the archive has been fully built.
pub fn save_results_workbook(
    path: impl AsRef<Path>,
    rows: &[ExportRow],
    options: &ExportOptions,
) -> Result<()> {
    let bytes = encode_results_workbook_with_options(rows, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
