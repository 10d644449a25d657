//! XLSX (Excel) spreadsheet reader and writer.
//!
//! Reading decompresses the package, resolves the first declared sheet
//! through the workbook relationships and decodes its rows into strings.
//! Writing produces a fixed single-sheet package named "Results".
//!
//! # Example
//!
//! ```no_run
//! use sheetcodec::xlsx::XlsxParser;
//!
//! let parser = XlsxParser::open("spreadsheet.xlsx")?;
//! println!("Sheets: {:?}", parser.sheet_names());
//!
//! let preview = parser.parse()?;
//! for row in &preview.rows {
//!     println!("{}", row.join("\t"));
//! }
//! # Ok::<(), sheetcodec::Error>(())
//! ```

mod package;
mod parser;
mod reference;
mod shared_strings;
mod sheet_writer;
mod workbook;
mod worksheet;

pub use package::{assemble, encode, part_paths, RESULTS_SHEET_NAME};
pub use parser::XlsxParser;
pub use reference::{cell_reference, column_index_from_reference, column_letters, MAX_COLUMN_INDEX};
pub use shared_strings::{SharedStrings, SHARED_STRINGS_PATH};
pub use sheet_writer::{dimension_ref, escape_xml, write_results_sheet, HEADER};
pub use workbook::{parse_sheets, WORKBOOK_PATH, WORKBOOK_RELS_PATH, WORKBOOK_ROOT};
pub use worksheet::{decode_worksheet, densify, resolve_cell_value, CellType};
