//! Worksheet XML generation for the results sheet.

use crate::model::ExportRow;
use std::borrow::Cow;
use std::fmt::Write;

use super::reference::cell_reference;

/// Header labels written to row 1.
pub const HEADER: [&str; 3] = ["No", "Name", "Timestamp"];

/// Column widths for A, B and C.
const COLUMN_WIDTHS: [u32; 3] = [10, 34, 24];

/// First data row (row 1 holds the header).
const FIRST_DATA_ROW: usize = 2;

/// Escape text for element content or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their entity forms. Tab, line
/// feed and carriage return become character references so parsers keep
/// them as written, and characters not allowed in XML 1.0 become U+FFFD.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(text);
    if !escaped.chars().any(needs_rewrite) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    for ch in escaped.chars() {
        match ch {
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    Cow::Owned(out)
}

/// XML 1.0 `Char` production (surrogates cannot occur in a `str`).
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn needs_rewrite(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r') || !is_xml_char(ch)
}

/// Whether `<t>` needs `xml:space="preserve"` to keep the text's spacing.
fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) || text.contains("  ")
}

/// The `ref` of the `dimension` element: `A1:C{last_row}`, never below row 2.
pub fn dimension_ref(row_count: usize) -> String {
    let last_row = (FIRST_DATA_ROW - 1 + row_count).max(FIRST_DATA_ROW);
    format!("A1:{}", cell_reference(HEADER.len() - 1, last_row))
}

fn write_inline_cell(out: &mut String, column: usize, row: usize, text: &str) {
    let space = if needs_space_preserve(text) {
        r#" xml:space="preserve""#
    } else {
        ""
    };
    let _ = write!(
        out,
        r#"<c r="{}" t="inlineStr"><is><t{}>{}</t></is></c>"#,
        cell_reference(column, row),
        space,
        escape_xml(text)
    );
}

fn write_number_cell(out: &mut String, column: usize, row: usize, value: i64) {
    let _ = write!(out, r#"<c r="{}"><v>{}</v></c>"#, cell_reference(column, row), value);
}

/// Build the XML of the results worksheet.
///
/// Row 1 holds [`HEADER`]; each export row follows from row 2 with the
/// sequence number as a numeric cell and name/timestamp as inline strings.
pub fn write_results_sheet(rows: &[ExportRow]) -> String {
    let mut out = String::with_capacity(512 + rows.len() * 160);

    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);
    let _ = write!(out, r#"<dimension ref="{}"/>"#, dimension_ref(rows.len()));
    out.push_str(r#"<sheetViews><sheetView workbookViewId="0"/></sheetViews>"#);
    out.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

    out.push_str("<cols>");
    for (idx, width) in COLUMN_WIDTHS.iter().enumerate() {
        let _ = write!(
            out,
            r#"<col min="{0}" max="{0}" width="{1}" customWidth="1"/>"#,
            idx + 1,
            width
        );
    }
    out.push_str("</cols>");

    out.push_str("<sheetData>");
    out.push_str(r#"<row r="1">"#);
    for (col, label) in HEADER.iter().enumerate() {
        write_inline_cell(&mut out, col, 1, label);
    }
    out.push_str("</row>");

    for (offset, row) in rows.iter().enumerate() {
        let r = FIRST_DATA_ROW + offset;
        let _ = write!(out, r#"<row r="{}">"#, r);
        write_number_cell(&mut out, 0, r, row.sequence_number);
        write_inline_cell(&mut out, 1, r, &row.name);
        write_inline_cell(&mut out, 2, r, &row.timestamp);
        out.push_str("</row>");
    }

    out.push_str("</sheetData>");
    out.push_str("</worksheet>");
    out
}
