//! Workbook part parsing: the ordered list of declared sheets.

use crate::container::ElementDepth;
use crate::error::{Error, Result};
use crate::model::SheetDescriptor;

/// Part path of the workbook.
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";

/// Part path of the workbook relationships.
pub const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";

/// Directory that workbook relationship targets are resolved under.
pub const WORKBOOK_ROOT: &str = "xl";

/// Parse workbook.xml into sheet descriptors, in declaration order.
///
/// The relationship ID is read from any namespace-prefixed `id` attribute
/// (normally `r:id`), so packages that bind the relationships namespace to a
/// different prefix still resolve.
pub fn parse_sheets(xml: &str) -> Result<Vec<SheetDescriptor>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut depth = ElementDepth::default();
    let mut in_sheets = false;

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf);
        if let Ok(ref e) = event {
            depth.track(e)?;
        }
        match event {
            Ok(quick_xml::events::Event::Start(e)) if e.local_name().as_ref() == b"sheets" => {
                in_sheets = true;
            }
            Ok(quick_xml::events::Event::End(e)) if e.local_name().as_ref() == b"sheets" => {
                in_sheets = false;
            }
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if in_sheets && e.local_name().as_ref() == b"sheet" =>
            {
                let mut name = String::new();
                let mut relationship_id = String::new();

                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                    match (attr.key.prefix(), attr.key.local_name().as_ref()) {
                        (None, b"name") => name = value,
                        (Some(_), b"id") => relationship_id = value,
                        _ => {}
                    }
                }

                sheets.push(SheetDescriptor {
                    name,
                    relationship_id,
                });
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(sheets)
}
