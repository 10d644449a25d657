//! JSON renderer implementation.

use crate::error::{Error, Result};
use crate::model::WorkbookPreview;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a preview to JSON.
pub fn to_json(preview: &WorkbookPreview, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Compact => serde_json::to_string(preview),
        JsonFormat::Pretty => serde_json::to_string_pretty(preview),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a preview to JSON with default formatting.
pub fn to_json_default(preview: &WorkbookPreview) -> Result<String> {
    to_json(preview, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkbookPreview {
        WorkbookPreview::new(
            vec!["Results".to_string()],
            "Results",
            vec![vec!["No".to_string(), "Name".to_string()]],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"activeSheet\": \"Results\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"columns\":[\"No\",\"Name\"]"));
    }

    #[test]
    fn test_preview_roundtrip() {
        let preview = sample();
        let json = to_json_default(&preview).unwrap();
        let parsed: WorkbookPreview = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, preview);
    }
}
