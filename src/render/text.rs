//! Plain text renderer implementation.

use crate::model::WorkbookPreview;

/// Render rows as tab-separated lines.
///
/// Tabs and line breaks inside a cell are replaced by spaces so each row
/// stays on one line. `max_rows` limits the number of rows written.
pub fn to_text(preview: &WorkbookPreview, max_rows: Option<usize>) -> String {
    let limit = max_rows.unwrap_or(usize::MAX);
    let mut output = String::new();

    for row in preview.rows.iter().take(limit) {
        let line: Vec<String> = row.iter().map(|cell| flatten_cell(cell)).collect();
        output.push_str(&line.join("\t"));
        output.push('\n');
    }

    output
}

fn flatten_cell(cell: &str) -> String {
    cell.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(rows: &[&[&str]]) -> WorkbookPreview {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        WorkbookPreview::new(vec!["S".to_string()], "S", rows)
    }

    #[test]
    fn test_tab_separated() {
        let text = to_text(&preview(&[&["a", "", "c"], &[], &["1"]]), None);
        assert_eq!(text, "a\t\tc\n\n1\n");
    }

    #[test]
    fn test_limit_and_flatten() {
        let text = to_text(&preview(&[&["line\none", "tab\there"], &["x"]]), Some(1));
        assert_eq!(text, "line one\ttab here\n");
    }
}
