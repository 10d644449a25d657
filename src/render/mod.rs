//! Output rendering for decoded workbooks.
//!
//! # Example
//!
//! ```no_run
//! use sheetcodec::{decode_workbook_file, render::*};
//!
//! let preview = decode_workbook_file("data.xlsx")?;
//!
//! // Tab-separated text, first 20 rows
//! let text = to_text(&preview, Some(20));
//!
//! // JSON payload
//! let json = to_json(&preview, JsonFormat::Pretty)?;
//! # Ok::<(), sheetcodec::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use text::to_text;
