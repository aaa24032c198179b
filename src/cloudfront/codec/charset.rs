//! Source charset normalization.
//!
//! Every line is converted from the configured source encoding into UTF-8
//! before it reaches a record. Invalid byte sequences never fail a line:
//! encoding_rs substitutes U+FFFD and a warning is logged.

use std::borrow::Cow;

use encoding_rs::Encoding;
use log::{debug, warn};

use crate::cloudfront::types::error::{CloudfrontError, Result};
use crate::cloudfront::utils;

/// Converter from a fixed source encoding to UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    /// Resolves `label` into a converter.
    ///
    /// # Errors
    /// Returns [`CloudfrontError::UnsupportedCharset`] if the label is unknown
    /// or names an encoding that is not ASCII-compatible (lines are split on
    /// the `0x0A` byte, which UTF-16 does not preserve).
    pub fn new(label: &str) -> Result<Self> {
        let encoding = utils::parse_encoding(label)
            .filter(|encoding| encoding.is_ascii_compatible())
            .ok_or_else(|| CloudfrontError::UnsupportedCharset(label.to_string()))?;
        debug!("Charset '{}' resolved to {}", label, encoding.name());
        Ok(Self { encoding })
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Converts raw line bytes into UTF-8 text.
    ///
    /// Valid UTF-8 input under the UTF-8 charset is borrowed as-is.
    pub fn convert<'a>(&self, raw: &'a [u8]) -> Cow<'a, str> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(raw);
        if had_errors {
            warn!(
                "Invalid {} byte sequence replaced while converting line ({} bytes)",
                self.encoding.name(),
                raw.len()
            );
        }
        text
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }
}
