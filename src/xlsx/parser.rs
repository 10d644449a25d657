//! XLSX package reader.

use crate::container::{PackageParts, Relationships};
use crate::error::{Error, Result};
use crate::model::{SheetDescriptor, WorkbookPreview};
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::workbook::{parse_sheets, WORKBOOK_PATH, WORKBOOK_RELS_PATH, WORKBOOK_ROOT};
use super::worksheet::decode_worksheet;

/// Reader for XLSX (Excel) workbooks.
///
/// Opening a parser decompresses the whole package and loads the shared
/// strings, the sheet list and the workbook relationships. [`parse`] then
/// decodes the first declared sheet only; the remaining sheets are reported
/// by name.
///
/// [`parse`]: XlsxParser::parse
pub struct XlsxParser {
    parts: PackageParts,
    shared_strings: SharedStrings,
    sheets: Vec<SheetDescriptor>,
    relationships: Relationships,
}

impl XlsxParser {
    /// Open an XLSX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let parts = PackageParts::open(path)?;
        Self::from_parts(parts)
    }

    /// Create a parser from archive bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let parts = PackageParts::from_bytes(data)?;
        Self::from_parts(parts)
    }

    /// Create a parser from an already decompressed package.
    ///
    /// Fails when the workbook part or its relationships are missing or
    /// malformed, or when the workbook declares no sheets.
    pub fn from_parts(parts: PackageParts) -> Result<Self> {
        let shared_strings = SharedStrings::from_parts(&parts);

        let sheets = parse_sheets(&parts.read_xml(WORKBOOK_PATH)?)?;
        if sheets.is_empty() {
            return Err(Error::NoSheet);
        }

        let relationships = Relationships::parse(&parts.read_xml(WORKBOOK_RELS_PATH)?)?;

        log::debug!(
            "workbook: {} sheets, {} relationships, {} shared strings",
            sheets.len(),
            relationships.len(),
            shared_strings.len()
        );

        Ok(Self {
            parts,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Decode the first sheet's rows.
    pub fn parse(&self) -> Result<WorkbookPreview> {
        let first = self.sheets.first().ok_or(Error::NoSheet)?;
        let sheet_path = self.worksheet_path(first)?;
        log::debug!("decoding sheet {:?} from {}", first.name, sheet_path);

        let xml = self.parts.read_xml(&sheet_path)?;
        let rows = decode_worksheet(&xml, &self.shared_strings)?;

        Ok(WorkbookPreview::new(self.sheet_names(), first.name.clone(), rows))
    }

    /// Package part path of a sheet's worksheet.
    fn worksheet_path(&self, sheet: &SheetDescriptor) -> Result<String> {
        let path = self
            .relationships
            .resolve_target(&sheet.relationship_id, WORKBOOK_ROOT)
            .ok_or_else(|| {
                Error::MissingComponent(format!(
                    "relationship {:?} for sheet {:?}",
                    sheet.relationship_id, sheet.name
                ))
            })?;

        if let Some(rel) = self
            .relationships
            .get(&sheet.relationship_id)
            .filter(|rel| !is_worksheet_relationship(&rel.rel_type))
        {
            log::warn!(
                "sheet {:?} points at a {:?} relationship, reading it as a worksheet",
                sheet.name,
                rel.rel_type
            );
        }

        Ok(path)
    }

    /// Get a reference to the decompressed package.
    pub fn parts(&self) -> &PackageParts {
        &self.parts
    }

    /// Declared sheets, in order.
    pub fn sheets(&self) -> &[SheetDescriptor] {
        &self.sheets
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

/// Whether a relationship type names a worksheet, under either the
/// transitional or the strict namespace.
fn is_worksheet_relationship(rel_type: &str) -> bool {
    rel_type.rsplit('/').next() == Some("worksheet")
}

impl std::fmt::Debug for XlsxParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxParser")
            .field("parts", &self.parts)
            .field("sheets", &self.sheets)
            .finish()
    }
}
