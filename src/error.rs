//! Error types for the sheetcodec library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetcodec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a spreadsheet package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file or archive operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The workbook part declares no sheets.
    #[error("no sheet found")]
    NoSheet,

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
