//! ZIP package abstraction for OOXML spreadsheets.
//!
//! A [`PackageParts`] holds every part of a package fully decompressed in
//! memory, keyed by its forward-slash path. The reader builds one from archive
//! bytes; the writer fills one with generated parts and serializes it back to
//! a deflate-compressed archive.

use crate::error::{Error, Result};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

/// Default deflate level used when writing packages.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// A relationship entry from a .rels file.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or rooted)
    pub target: String,
}

/// Collection of relationships parsed from a .rels file.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Map from relationship ID to relationship data
    pub by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationships part.
    ///
    /// Entries without an `Id` are skipped. Malformed XML is an error.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut rels = Self::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut depth = ElementDepth::default();
        loop {
            buf.clear();
            let event = reader.read_event_into(&mut buf);
            if let Ok(ref e) = event {
                depth.track(e)?;
            }
            match event {
                Ok(quick_xml::events::Event::Empty(e))
                | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        let value = attr
                            .unescape_value()
                            .map(|v| v.into_owned())
                            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            _ => {}
                        }
                    }

                    if !id.is_empty() {
                        rels.add(Relationship {
                            id,
                            rel_type,
                            target,
                        });
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Add a relationship, replacing any with the same ID.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Resolve a relationship ID to a package part path under `root`.
    ///
    /// See [`normalize_target`] for the path rules.
    pub fn resolve_target(&self, id: &str, root: &str) -> Option<String> {
        self.get(id).map(|rel| normalize_target(&rel.target, root))
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Normalize a relationship target into a package part path.
///
/// A leading `/` is stripped. Targets already under `root/` are returned
/// as-is; anything else is joined under `root`, with `.` and `..` segments
/// collapsed.
///
/// ```
/// use sheetcodec::container::normalize_target;
///
/// assert_eq!(normalize_target("worksheets/sheet1.xml", "xl"), "xl/worksheets/sheet1.xml");
/// assert_eq!(normalize_target("/xl/worksheets/sheet2.xml", "xl"), "xl/worksheets/sheet2.xml");
/// ```
pub fn normalize_target(target: &str, root: &str) -> String {
    let target = target.strip_prefix('/').unwrap_or(target);
    let root = root.trim_end_matches('/');
    if target.starts_with(&format!("{}/", root)) {
        return target.to_string();
    }

    let mut segments: Vec<&str> = root.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Open element count for a streaming XML parse.
///
/// quick-xml reports `Eof` even when elements are still open, so every
/// reader feeds its events through this to reject truncated parts.
#[derive(Debug, Default)]
pub(crate) struct ElementDepth(usize);

impl ElementDepth {
    /// Account for one event; `Eof` with open elements is an error.
    pub(crate) fn track(&mut self, event: &quick_xml::events::Event<'_>) -> Result<()> {
        match event {
            quick_xml::events::Event::Start(_) => self.0 += 1,
            quick_xml::events::Event::End(_) => self.0 = self.0.saturating_sub(1),
            quick_xml::events::Event::Eof if self.0 > 0 => {
                return Err(Error::XmlParse(format!(
                    "unexpected end of document with {} unclosed element(s)",
                    self.0
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// Once UTF-16 content has been decoded into a Rust `String`, its declaration
/// must stop claiming UTF-16 or quick-xml will try to decode it again.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// Spreadsheet parts are almost always UTF-8, but some producers emit
/// UTF-16 with a byte order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).map_err(|e| Error::Encoding(e.to_string()));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // ASCII markup in UTF-16 leaves a zero in every other byte
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes)
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// In-memory map of package part paths to their decompressed bytes.
#[derive(Clone, Default)]
pub struct PackageParts {
    parts: BTreeMap<String, Vec<u8>>,
}

impl PackageParts {
    /// Create an empty part map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sheetcodec::container::PackageParts;
    ///
    /// let parts = PackageParts::open("data.xlsx")?;
    /// println!("{} parts", parts.len());
    /// # Ok::<(), sheetcodec::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Decompress every entry of an archive held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Decompress every entry of an archive from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut parts = BTreeMap::new();

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().replace('\\', "/");
            // The header's size is untrusted; let the buffer grow with the data.
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            parts.insert(path, content);
        }

        log::debug!("decompressed {} package parts", parts.len());
        Ok(Self { parts })
    }

    /// Insert or replace a part.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.parts.insert(path.into(), content.into());
    }

    /// Raw bytes of a part.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    /// Check if a part exists.
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// Read a required XML part as a string.
    ///
    /// A missing part is a [`Error::MissingComponent`]; a part with no
    /// content is an [`Error::XmlParse`].
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self
            .get(path)
            .ok_or_else(|| Error::MissingComponent(path.to_string()))?;
        let content = decode_xml_bytes(bytes)?;
        if content.trim().is_empty() {
            return Err(Error::XmlParse(format!("{} is empty", path)));
        }
        Ok(content)
    }

    /// Read an optional XML part; `None` when absent.
    pub fn read_optional_xml(&self, path: &str) -> Result<Option<String>> {
        self.get(path).map(decode_xml_bytes).transpose()
    }

    /// Part paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Iterate over `(path, bytes)` pairs in lexicographic order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<u8>> {
        self.parts.iter()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serialize all parts into a deflate-compressed ZIP archive.
    ///
    /// `compression_level` is passed to the deflate encoder (`None` uses the
    /// encoder default). The archive is only returned once it has been
    /// finalized; any failure aborts the whole write.
    pub fn to_archive_bytes(&self, compression_level: Option<i64>) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(compression_level);

        for (path, content) in &self.parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(content)?;
        }

        let bytes = zip.finish()?.into_inner();
        log::debug!("wrote {} parts into {} archive bytes", self.parts.len(), bytes.len());
        Ok(bytes)
    }
}

impl<'a> IntoIterator for &'a PackageParts {
    type Item = (&'a String, &'a Vec<u8>);
    type IntoIter = btree_map::Iter<'a, String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for PackageParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageParts")
            .field("parts", &self.parts.len())
            .finish()
    }
}
