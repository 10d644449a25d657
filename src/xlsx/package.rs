//! Assembly of the minimal single-sheet results package.

use crate::container::PackageParts;
use crate::error::Result;
use crate::model::ExportRow;
use crate::options::ExportOptions;

use super::sheet_writer::{escape_xml, write_results_sheet};

/// Name of the only sheet in a results workbook.
pub const RESULTS_SHEET_NAME: &str = "Results";

/// Everything a part generator needs.
struct PartContext<'a> {
    rows: &'a [ExportRow],
    options: &'a ExportOptions,
    timestamp: String,
}

type PartGenerator = fn(&PartContext<'_>) -> String;

/// Every part of a results package, in archive order.
const PACKAGE_PARTS: &[(&str, PartGenerator)] = &[
    ("[Content_Types].xml", content_types),
    ("_rels/.rels", root_relationships),
    ("docProps/app.xml", app_properties),
    ("docProps/core.xml", core_properties),
    ("xl/_rels/workbook.xml.rels", workbook_relationships),
    ("xl/styles.xml", styles),
    ("xl/workbook.xml", workbook),
    ("xl/worksheets/sheet1.xml", worksheet),
];

/// Paths of the parts written by [`assemble`].
pub fn part_paths() -> impl Iterator<Item = &'static str> {
    PACKAGE_PARTS.iter().map(|(path, _)| *path)
}

/// Build every part of a results workbook.
pub fn assemble(rows: &[ExportRow], options: &ExportOptions) -> PackageParts {
    let context = PartContext {
        rows,
        options,
        timestamp: options.timestamp_w3cdtf(),
    };

    let mut parts = PackageParts::new();
    for (path, generate) in PACKAGE_PARTS {
        parts.insert(*path, generate(&context));
    }
    parts
}

/// Encode export rows as a complete XLSX archive.
pub fn encode(rows: &[ExportRow], options: &ExportOptions) -> Result<Vec<u8>> {
    let parts = assemble(rows, options);
    log::debug!("assembled {} parts for {} export rows", parts.len(), rows.len());
    parts.to_archive_bytes(options.compression_level)
}

fn content_types(_: &PartContext<'_>) -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#
        .to_string()
}

fn root_relationships(_: &PartContext<'_>) -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
        .to_string()
}

fn app_properties(ctx: &PartContext<'_>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>{}</Application>
</Properties>"#,
        escape_xml(&ctx.options.application)
    )
}

fn core_properties(ctx: &PartContext<'_>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dc:creator>{creator}</dc:creator>
  <cp:lastModifiedBy>{modified_by}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>
</cp:coreProperties>"#,
        title = escape_xml(&ctx.options.title),
        creator = escape_xml(&ctx.options.creator),
        modified_by = escape_xml(&ctx.options.last_modified_by),
        ts = ctx.timestamp,
    )
}

fn workbook(_: &PartContext<'_>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="{}" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#,
        RESULTS_SHEET_NAME
    )
}

fn workbook_relationships(_: &PartContext<'_>) -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
        .to_string()
}

fn styles(_: &PartContext<'_>) -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
  <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
  <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
</styleSheet>"#
        .to_string()
}

fn worksheet(ctx: &PartContext<'_>) -> String {
    write_results_sheet(ctx.rows)
}
