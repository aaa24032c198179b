//! Per-line record construction.

use std::io::Read;

use crate::cloudfront::codec::charset::Charset;
use crate::cloudfront::codec::compression::DecodedStream;
use crate::cloudfront::types::error::Result;
use crate::cloudfront::types::models::{HeaderMetadata, Record};
use crate::cloudfront::utils;

/// Reads one line from `stream` and turns it into a [`Record`].
///
/// Returns `Ok(None)` at end of stream. `buf` is reused between calls so only
/// one line is held in memory at a time.
pub fn next_record<R: Read>(
    stream: &mut DecodedStream<R>,
    charset: &Charset,
    metadata: &HeaderMetadata,
    buf: &mut Vec<u8>,
) -> Result<Option<Record>> {
    if stream.read_line(buf)? == 0 {
        return Ok(None);
    }
    let message = charset.convert(utils::trim_line_ending(buf)).into_owned();
    Ok(Some(Record::new(message, metadata)))
}

/// Drains `stream`, handing each record to `emit` before reading the next line.
///
/// Returns the number of records emitted. On error, records already emitted
/// stay emitted.
pub fn for_each_line<R: Read, F: FnMut(Record)>(
    stream: &mut DecodedStream<R>,
    metadata: &HeaderMetadata,
    charset: &Charset,
    mut emit: F,
) -> Result<u64> {
    let mut buf = Vec::new();
    let mut count = 0;
    while let Some(record) = next_record(stream, charset, metadata, &mut buf)? {
        emit(record);
        count += 1;
    }
    Ok(count)
}
