//! Decoded workbook structures.

use serde::{Deserialize, Serialize};

/// A single decoded row: one string per column, densified.
pub type Row = Vec<String>;

/// A sheet declared in the workbook part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDescriptor {
    /// Sheet display name
    pub name: String,
    /// Relationship ID pointing at the worksheet part (e.g., "rId1")
    pub relationship_id: String,
}

/// Result of decoding a workbook: every sheet name plus the rows of the
/// first sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookPreview {
    /// Sheet names in declaration order
    #[serde(rename = "sheets")]
    pub sheet_names: Vec<String>,

    /// Name of the sheet whose rows were decoded
    #[serde(rename = "activeSheet")]
    pub active_sheet: String,

    /// First decoded row, or empty when the sheet has no rows
    pub columns: Row,

    /// Decoded rows, in document order
    pub rows: Vec<Row>,
}

impl WorkbookPreview {
    /// Build a preview; `columns` is taken from the first row.
    pub fn new(sheet_names: Vec<String>, active_sheet: impl Into<String>, rows: Vec<Row>) -> Self {
        let columns = rows.first().cloned().unwrap_or_default();
        Self {
            sheet_names,
            active_sheet: active_sheet.into(),
            columns,
            rows,
        }
    }

    /// Number of decoded rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if no rows were decoded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
