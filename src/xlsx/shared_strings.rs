//! XLSX shared strings parsing.

use crate::container::{ElementDepth, PackageParts};
use crate::error::{Error, Result};

/// Part path of the shared strings table.
pub const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Shared strings table.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    /// All strings in order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Load the table from a package.
    ///
    /// The part is optional: an absent part gives an empty table, and so does
    /// one that fails to parse (logged at warn level).
    pub fn from_parts(parts: &PackageParts) -> Self {
        let xml = match parts.read_optional_xml(SHARED_STRINGS_PATH) {
            Ok(Some(xml)) => xml,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("ignoring undecodable {}: {}", SHARED_STRINGS_PATH, e);
                return Self::default();
            }
        };

        match Self::parse(&xml) {
            Ok(strings) => strings,
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", SHARED_STRINGS_PATH, e);
                Self::default()
            }
        }
    }

    /// Parse shared strings from XML content.
    ///
    /// Each `si` entry yields its direct `t` text when non-empty, otherwise
    /// the concatenated `r/t` run texts. Phonetic runs (`rPh`) are skipped.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut depth = ElementDepth::default();
        let mut in_si = false;
        let mut in_run = false;
        let mut in_phonetic = false;
        let mut in_t = false;
        let mut direct_text = String::new();
        let mut run_text = String::new();

        loop {
            buf.clear();
            let event = reader.read_event_into(&mut buf);
        if let Ok(ref e) = event {
            depth.track(e)?;
        }
        match event {
                Ok(quick_xml::events::Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        direct_text.clear();
                        run_text.clear();
                    }
                    b"r" if in_si => in_run = true,
                    b"rPh" if in_si => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"si" {
                        strings.push(String::new());
                    }
                }
                Ok(quick_xml::events::Event::Text(e)) => {
                    if in_t {
                        let text = e.unescape().unwrap_or_default();
                        if in_run {
                            run_text.push_str(&text);
                        } else {
                            direct_text.push_str(&text);
                        }
                    }
                }
                Ok(quick_xml::events::Event::CData(e)) => {
                    if in_t {
                        let text = String::from_utf8_lossy(&e);
                        if in_run {
                            run_text.push_str(&text);
                        } else {
                            direct_text.push_str(&text);
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        let text = if direct_text.is_empty() {
                            std::mem::take(&mut run_text)
                        } else {
                            std::mem::take(&mut direct_text)
                        };
                        strings.push(text);
                        in_si = false;
                    }
                    b"r" => in_run = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
