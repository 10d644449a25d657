//! Export record accepted by the writer.

use serde::{Deserialize, Serialize};

/// One result line written to the exported sheet.
///
/// The schema is fixed: a sequence number, a name and a timestamp string,
/// written to columns A, B and C.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Sequence number, written as a numeric cell
    #[serde(rename = "no", alias = "sequenceNumber")]
    pub sequence_number: i64,

    /// Name, written as an inline string
    pub name: String,

    /// Timestamp text, written as an inline string without interpretation
    pub timestamp: String,
}

impl ExportRow {
    /// Create an export row.
    pub fn new(sequence_number: i64, name: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sequence_number,
            name: name.into(),
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_payload() {
        let rows: Vec<ExportRow> = serde_json::from_str(
            r#"[{"no": 1, "name": "Alice", "timestamp": "2024-01-01T00:00:00Z"},
                {"sequenceNumber": 2, "name": "Bob", "timestamp": ""}]"#,
        )
        .unwrap();

        assert_eq!(rows[0], ExportRow::new(1, "Alice", "2024-01-01T00:00:00Z"));
        assert_eq!(rows[1].sequence_number, 2);
    }

    #[test]
    fn test_serialize_uses_short_name() {
        let json = serde_json::to_string(&ExportRow::new(3, "C", "t")).unwrap();
        assert_eq!(json, r#"{"no":3,"name":"C","timestamp":"t"}"#);
    }
}
