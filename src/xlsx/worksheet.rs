//! Worksheet decoding into densified string rows.

use crate::container::ElementDepth;
use crate::error::{Error, Result};
use crate::model::Row;

use super::reference::{column_index_from_reference, MAX_COLUMN_INDEX};
use super::shared_strings::SharedStrings;

/// How a cell's value is stored, from its `t` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellType {
    /// `t="s"`: the value is an index into the shared strings table
    SharedString,
    /// `t="inlineStr"`: the text lives in the cell's `is` element
    InlineString,
    /// Anything else: the `v` text is used verbatim
    #[default]
    Literal,
}

impl CellType {
    fn from_attr(value: &[u8]) -> Self {
        match value {
            b"s" => CellType::SharedString,
            b"inlineStr" => CellType::InlineString,
            _ => CellType::Literal,
        }
    }
}

/// Resolve a cell's display text.
///
/// Shared string indices that do not parse or fall outside the table give an
/// empty string. Literal values are never converted, so numbers and booleans
/// stay in their stored text form.
pub fn resolve_cell_value(
    cell_type: CellType,
    raw_value: &str,
    inline_text: &str,
    shared_strings: &SharedStrings,
) -> String {
    match cell_type {
        CellType::SharedString => raw_value
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .unwrap_or_default()
            .to_string(),
        CellType::InlineString => inline_text.to_string(),
        CellType::Literal => raw_value.to_string(),
    }
}

/// Scatter `(column, value)` pairs into a dense row.
///
/// The row is sized to the highest column plus one; unset positions are
/// empty strings. When a column repeats, the later value wins.
pub fn densify(cells: Vec<(usize, String)>) -> Row {
    let Some(width) = cells.iter().map(|(col, _)| col + 1).max() else {
        return Vec::new();
    };

    let mut row = vec![String::new(); width];
    for (col, value) in cells {
        row[col] = value;
    }
    row
}

/// Which text node inside a cell is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Value,
    InlineDirect,
    InlineRun,
}

/// Cell under construction.
#[derive(Debug, Default)]
struct PendingCell {
    column: Option<usize>,
    cell_type: CellType,
    value: String,
    inline_direct: String,
    inline_runs: String,
}

impl PendingCell {
    fn from_start(e: &quick_xml::events::BytesStart<'_>) -> Self {
        let mut cell = Self::default();
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    cell.column = column_index_from_reference(&String::from_utf8_lossy(&attr.value))
                        .filter(|&column| column <= MAX_COLUMN_INDEX);
                }
                b"t" => cell.cell_type = CellType::from_attr(&attr.value),
                _ => {}
            }
        }
        cell
    }

    fn inline_text(&self) -> &str {
        if self.inline_direct.is_empty() {
            &self.inline_runs
        } else {
            &self.inline_direct
        }
    }
}

/// Decode a worksheet part into rows of strings.
///
/// Only `row` elements under `sheetData` are read. Each cell's column comes
/// from its reference; a cell without a usable reference (no letters, or a
/// column past `XFD`) takes its ordinal position within the row. Structural XML errors are returned as
/// [`Error::XmlParse`].
pub fn decode_worksheet(xml: &str, shared_strings: &SharedStrings) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut depth = ElementDepth::default();
    let mut in_sheet_data = false;
    let mut row_cells: Option<Vec<(usize, String)>> = None;
    let mut cell: Option<PendingCell> = None;
    let mut cell_position = 0usize;
    let mut in_inline = false;
    let mut in_run = false;
    let mut in_phonetic = false;
    let mut text_target: Option<TextTarget> = None;

    let finish_cell = |cell: PendingCell, position: usize| -> (usize, String) {
        let column = cell.column.unwrap_or(position);
        let value = resolve_cell_value(cell.cell_type, &cell.value, cell.inline_text(), shared_strings);
        (column, value)
    };

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf);
        if let Ok(ref e) = event {
            depth.track(e)?;
        }
        match event {
            Ok(quick_xml::events::Event::Start(ref e)) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = true,
                b"row" if in_sheet_data => {
                    row_cells = Some(Vec::new());
                    cell_position = 0;
                }
                b"c" if row_cells.is_some() => {
                    cell = Some(PendingCell::from_start(e));
                    in_inline = false;
                    in_run = false;
                    in_phonetic = false;
                }
                b"v" if cell.is_some() && !in_inline => text_target = Some(TextTarget::Value),
                b"is" if cell.is_some() => in_inline = true,
                b"r" if in_inline => in_run = true,
                b"rPh" if in_inline => in_phonetic = true,
                b"t" if in_inline && !in_phonetic => {
                    text_target = Some(if in_run {
                        TextTarget::InlineRun
                    } else {
                        TextTarget::InlineDirect
                    });
                }
                _ => {}
            },
            Ok(quick_xml::events::Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"row" if in_sheet_data => rows.push(Vec::new()),
                b"c" => {
                    if let Some(cells) = row_cells.as_mut() {
                        let pending = PendingCell::from_start(e);
                        cells.push(finish_cell(pending, cell_position));
                        cell_position += 1;
                    }
                }
                _ => {}
            },
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if let (Some(target), Some(pending)) = (text_target, cell.as_mut()) {
                    let text = e.unescape().unwrap_or_default();
                    push_text(pending, target, &text);
                }
            }
            Ok(quick_xml::events::Event::CData(ref e)) => {
                if let (Some(target), Some(pending)) = (text_target, cell.as_mut()) {
                    push_text(pending, target, &String::from_utf8_lossy(e));
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = false,
                b"row" => {
                    if let Some(cells) = row_cells.take() {
                        rows.push(densify(cells));
                    }
                }
                b"c" => {
                    if let (Some(pending), Some(cells)) = (cell.take(), row_cells.as_mut()) {
                        cells.push(finish_cell(pending, cell_position));
                        cell_position += 1;
                    }
                    text_target = None;
                }
                b"v" | b"t" => text_target = None,
                b"is" => in_inline = false,
                b"r" => in_run = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    log::debug!("decoded {} worksheet rows", rows.len());
    Ok(rows)
}

fn push_text(cell: &mut PendingCell, target: TextTarget, text: &str) {
    match target {
        TextTarget::Value => cell.value.push_str(text),
        TextTarget::InlineDirect => cell.inline_direct.push_str(text),
        TextTarget::InlineRun => cell.inline_runs.push_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            body
        )
    }

    fn shared(items: &[&str]) -> SharedStrings {
        let body: String = items.iter().map(|s| format!("<si><t>{}</t></si>", s)).collect();
        SharedStrings::parse(&format!("<sst>{}</sst>", body)).unwrap()
    }

    #[test]
    fn test_densify_gap() {
        let xml = sheet(r#"<row r="1"><c r="A1" t="inlineStr"><is><t>a</t></is></c><c r="C1"><v>3</v></c></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows, vec![vec!["a".to_string(), String::new(), "3".to_string()]]);
    }

    #[test]
    fn test_cell_types() {
        let ss = shared(&["zero", "one"]);
        let xml = sheet(
            r#"<row r="1">
                <c r="A1" t="s"><v>1</v></c>
                <c r="B1" t="b"><v>1</v></c>
                <c r="C1"><v>3.14</v></c>
                <c r="D1" t="str"><f>A1&amp;"x"</f><v>onex</v></c>
                <c r="E1" t="e"><v>#DIV/0!</v></c>
                <c r="F1" t="inlineStr"><is><r><t>ri</t></r><r><t>ch</t></r></is></c>
            </row>"#,
        );

        let rows = decode_worksheet(&xml, &ss).unwrap();
        assert_eq!(rows[0], vec!["one", "1", "3.14", "onex", "#DIV/0!", "rich"]);
    }

    #[test]
    fn test_shared_string_out_of_range() {
        let ss = shared(&["only"]);
        let xml = sheet(r#"<row r="1"><c r="A1" t="s"><v>5</v></c><c r="B1" t="s"><v>x</v></c><c r="C1" t="s"><v>0</v></c></row>"#);
        let rows = decode_worksheet(&xml, &ss).unwrap();
        assert_eq!(rows[0], vec!["", "", "only"]);
    }

    #[test]
    fn test_positional_fallback() {
        let xml = sheet(r#"<row><c><v>a</v></c><c><v>b</v></c><c r="E1"><v>e</v></c></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows[0], vec!["a", "b", "", "", "e"]);
    }

    #[test]
    fn test_empty_rows_kept() {
        let xml = sheet(r#"<row r="1"><c r="A1"><v>1</v></c></row><row r="2"/><row r="3"></row><row r="4"><c r="B4"/></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["1"]);
        assert!(rows[1].is_empty());
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec!["", ""]);
    }

    #[test]
    fn test_rows_outside_sheet_data_ignored() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>x</v></c></row></sheetData><extLst><row/></extLst></worksheet>"#;
        let rows = decode_worksheet(xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_escaped_inline_text() {
        let xml = sheet(r#"<row r="1"><c r="A1" t="inlineStr"><is><t>a&lt;b &amp; "c"</t></is></c></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows[0][0], r#"a<b & "c""#);
    }

    #[test]
    fn test_malformed_structure_is_error() {
        let xml = sheet(r#"<row r="1"><c r="A1"><v>1</v></row>"#);
        let result = decode_worksheet(&xml, &SharedStrings::default());
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_column_past_last_falls_back_to_position() {
        let xml = sheet(r#"<row r="1"><c r="A1"><v>a</v></c><c r="ZZZZZZZZZZZZ1"><v>x</v></c><c r="XFE1"><v>y</v></c></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows[0], vec!["a", "x", "y"]);
    }

    #[test]
    fn test_last_column_kept() {
        let xml = sheet(r#"<row r="1"><c r="XFD1"><v>end</v></c></row>"#);
        let rows = decode_worksheet(&xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows[0].len(), MAX_COLUMN_INDEX + 1);
        assert_eq!(rows[0][MAX_COLUMN_INDEX], "end");
    }

    #[test]
    fn test_truncated_sheet_is_error() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row><row r="2"><c r="A2"><v>2</v>"#;
        let result = decode_worksheet(xml, &SharedStrings::default());
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_densify_direct() {
        assert!(densify(Vec::new()).is_empty());
        assert_eq!(
            densify(vec![(2, "c".to_string()), (0, "a".to_string())]),
            vec!["a", "", "c"]
        );
    }
}
