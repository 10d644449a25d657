//! Data model shared by the reader and writer.
//!
//! The reader produces a [`WorkbookPreview`]; the writer consumes a slice of
//! [`ExportRow`]. Both serialize with serde so they can cross a JSON boundary
//! unchanged.

mod export;
mod preview;

pub use export::*;
pub use preview::*;
