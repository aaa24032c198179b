//! CloudFront log header parsing.
//!
//! # Header Structure
//! ```text
//! #Version: 1.0
//! #Fields: date time x-edge-location sc-bytes c-ip ...
//! ```
//!
//! Exactly two lines are consumed, whether or not they match. A line that is
//! missing or does not carry the expected prefix leaves its field unset.

use std::io::Read;
use std::sync::{Arc, OnceLock};

use log::debug;
use regex::Regex;

use crate::cloudfront::codec::charset::Charset;
use crate::cloudfront::codec::compression::DecodedStream;
use crate::cloudfront::types::error::Result;
use crate::cloudfront::types::models::HeaderMetadata;

static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();
static FIELDS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_PATTERN.get_or_init(|| Regex::new(r"^#Version: (.+)").expect("Invalid version header pattern"))
}

fn fields_regex() -> &'static Regex {
    FIELDS_PATTERN.get_or_init(|| Regex::new(r"^#Fields: (.+)").expect("Invalid fields header pattern"))
}

/// Reads the two header lines from `stream` and parses them.
///
/// The lines are consumed permanently; record decoding starts on line three.
///
/// # Errors
/// Only read failures from the underlying stream are reported. Missing or
/// malformed header lines are not errors.
pub fn extract<R: Read>(
    stream: &mut DecodedStream<R>,
    charset: &Charset,
    buf: &mut Vec<u8>,
) -> Result<HeaderMetadata> {
    let version = next_header_line(stream, charset, buf)?
        .and_then(|line| parse_version(&line));
    let fields = next_header_line(stream, charset, buf)?
        .and_then(|line| parse_fields(&line));

    Ok(HeaderMetadata { version, fields })
}

/// Parses a `#Version: <value>` line.
pub fn parse_version(line: &str) -> Option<Arc<str>> {
    capture_value(version_regex(), line, "#Version")
}

/// Parses a `#Fields: <value>` line.
pub fn parse_fields(line: &str) -> Option<Arc<str>> {
    capture_value(fields_regex(), line, "#Fields")
}

fn next_header_line<R: Read>(
    stream: &mut DecodedStream<R>,
    charset: &Charset,
    buf: &mut Vec<u8>,
) -> Result<Option<String>> {
    if stream.read_line(buf)? == 0 {
        debug!("Input '{}' ended inside the header", stream.identity());
        return Ok(None);
    }
    Ok(Some(charset.convert(buf).into_owned()))
}

fn capture_value(pattern: &Regex, line: &str, tag: &str) -> Option<Arc<str>> {
    let value = pattern
        .captures(line.trim_end())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty());
    if value.is_none() {
        debug!("Header line is not a {} line: {:?}", tag, line.trim_end());
    }
    value.map(Arc::from)
}
