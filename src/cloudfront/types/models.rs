//! Core data structures for the CloudFront codec.
//!
//! - Codec configuration
//! - Header metadata parsed from `#Version` / `#Fields`
//! - Output records

use std::sync::Arc;

/// Default source charset, matching the canonical internal encoding.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Configuration accepted by [`CloudfrontCodec::new`](crate::CloudfrontCodec::new).
///
/// The charset is a WHATWG encoding label such as `"UTF-8"`, `"CP1252"` or
/// `"ISO-8859-1"`, matched case-insensitively. It is validated when the codec
/// is built.
///
/// Only labels from the WHATWG Encoding Standard are known. Names outside it,
/// such as `IBM437`, `CP850` or `ASCII-8BIT`, are rejected with
/// [`CloudfrontError::UnsupportedCharset`](crate::CloudfrontError::UnsupportedCharset),
/// as are encodings that are not ASCII-compatible (UTF-16, ISO-2022-JP).
/// For raw Latin-1 style bytes use `"ISO-8859-1"`, which maps to windows-1252.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub charset: String,
}

impl CodecConfig {
    pub fn with_charset(charset: impl Into<String>) -> Self {
        Self {
            charset: charset.into(),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::with_charset(DEFAULT_CHARSET)
    }
}

/// Metadata parsed from the two header lines of a CloudFront log.
///
/// A field is `None` when its line is missing or does not match the expected
/// prefix. Frozen once extracted and shared by every record of a decode call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMetadata {
    pub version: Option<Arc<str>>,
    pub fields: Option<Arc<str>>,
}

/// A single decoded log line.
///
/// `message` carries the raw line (without its terminator) converted to
/// UTF-8. Column-level parsing is left to whoever consumes the record;
/// `cloudfront_fields` describes the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub message: String,
    pub cloudfront_version: Option<Arc<str>>,
    pub cloudfront_fields: Option<Arc<str>>,
}

impl Record {
    pub const MESSAGE: &'static str = "message";
    pub const VERSION: &'static str = "cloudfront_version";
    pub const FIELDS: &'static str = "cloudfront_fields";

    pub(crate) fn new(message: String, metadata: &HeaderMetadata) -> Self {
        Self {
            message,
            cloudfront_version: metadata.version.clone(),
            cloudfront_fields: metadata.fields.clone(),
        }
    }

    /// Looks up a field by its event name.
    ///
    /// Returns `None` for unknown names and for absent metadata.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            Self::MESSAGE => Some(self.message.as_str()),
            Self::VERSION => self.cloudfront_version.as_deref(),
            Self::FIELDS => self.cloudfront_fields.as_deref(),
            _ => None,
        }
    }
}
