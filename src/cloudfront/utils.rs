//! Small helpers shared by the codec layers.

use encoding_rs::Encoding;

/// Resolves an encoding label, normalizing the GBK family to GB18030.
///
/// Labels are matched case-insensitively. Returns `None` for unknown labels.
pub fn parse_encoding(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    let label = if label.eq_ignore_ascii_case("GBK") || label.eq_ignore_ascii_case("GB2312") {
        "GB18030"
    } else {
        label
    };
    Encoding::for_label(label.as_bytes())
}

/// Strips a trailing `\n` or `\r\n` from a raw line.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
