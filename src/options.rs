//! Writer configuration.

use crate::container::DEFAULT_COMPRESSION_LEVEL;
use chrono::{DateTime, SecondsFormat, Utc};

/// Options for writing a results workbook.
///
/// # Example
///
/// ```
/// use sheetcodec::ExportOptions;
///
/// let options = ExportOptions::new()
///     .with_title("Draw Results")
///     .with_creator("Front Desk");
/// assert_eq!(options.title, "Draw Results");
/// ```
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Document title (docProps/core.xml)
    pub title: String,

    /// Document creator (docProps/core.xml)
    pub creator: String,

    /// Last modified by (docProps/core.xml)
    pub last_modified_by: String,

    /// Producing application (docProps/app.xml)
    pub application: String,

    /// Deflate level; `None` uses the encoder default
    pub compression_level: Option<i64>,

    /// Creation/modification time; `None` means the current UTC time
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Results".to_string(),
            creator: env!("CARGO_PKG_NAME").to_string(),
            last_modified_by: env!("CARGO_PKG_NAME").to_string(),
            application: env!("CARGO_PKG_NAME").to_string(),
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            timestamp: None,
        }
    }
}

impl ExportOptions {
    /// Create default export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the creator and last-modified-by fields.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        let creator = creator.into();
        self.last_modified_by = creator.clone();
        self.creator = creator;
        self
    }

    /// Set the producing application name.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Set the deflate compression level.
    pub fn with_compression_level(mut self, level: Option<i64>) -> Self {
        self.compression_level = level;
        self
    }

    /// Pin the document timestamp instead of using the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The W3CDTF timestamp written to the document properties.
    pub fn timestamp_w3cdtf(&self) -> String {
        self.timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.title, "Results");
        assert_eq!(options.creator, "sheetcodec");
        assert_eq!(options.compression_level, Some(6));
        assert!(options.timestamp.is_none());
    }

    #[test]
    fn test_pinned_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let options = ExportOptions::new().with_timestamp(ts);
        assert_eq!(options.timestamp_w3cdtf(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_current_timestamp_round_trips() {
        let text = ExportOptions::new().timestamp_w3cdtf();
        assert!(text.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&text).is_ok());
    }

    #[test]
    fn test_with_creator_sets_both_fields() {
        let options = ExportOptions::new().with_creator("Ops");
        assert_eq!(options.creator, "Ops");
        assert_eq!(options.last_modified_by, "Ops");
    }
}
